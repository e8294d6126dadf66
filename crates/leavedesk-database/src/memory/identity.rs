use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use leavedesk_core::result::AppResult;
use leavedesk_entity::identity::{Identity, NewIdentity, Role, normalize_email};

use super::{Row, newest_first};
use crate::store::IdentityStore;

/// Process-local identity store.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    next_seq: u64,
    rows: Vec<Row<Identity>>,
}

impl MemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let email = normalize_email(email);
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .iter()
            .find(|r| r.value.email == email)
            .map(|r| r.value.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>> {
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .iter()
            .find(|r| r.value.id == id)
            .map(|r| r.value.clone()))
    }

    async fn insert(&self, data: NewIdentity, now: DateTime<Utc>) -> AppResult<Option<Identity>> {
        let email = normalize_email(&data.email);
        let mut table = self.inner.lock().await;
        if table.rows.iter().any(|r| r.value.email == email) {
            return Ok(None);
        }

        let identity = Identity {
            id: Uuid::now_v7(),
            name: data.name.trim().to_string(),
            email,
            password_hash: data.password_hash,
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.push(Row {
            seq,
            value: identity.clone(),
        });
        Ok(Some(identity))
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut table = self.inner.lock().await;
        match table.rows.iter_mut().find(|r| r.value.id == id) {
            Some(row) => {
                row.value.password_hash = password_hash.to_string();
                row.value.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut table = self.inner.lock().await;
        let before = table.rows.len();
        table.rows.retain(|r| r.value.id != id);
        Ok(table.rows.len() != before)
    }

    async fn list_all(&self) -> AppResult<Vec<Identity>> {
        let table = self.inner.lock().await;
        Ok(newest_first(&table.rows, |i| i.created_at, |_| true))
    }

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<Identity>> {
        let table = self.inner.lock().await;
        Ok(newest_first(&table.rows, |i| i.created_at, |i| i.role == role))
    }

    async fn count_by_role(&self, role: Role) -> AppResult<u64> {
        let table = self.inner.lock().await;
        Ok(table.rows.iter().filter(|r| r.value.role == role).count() as u64)
    }

    async fn count_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<u64> {
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|r| r.value.created_at >= from && r.value.created_at < to)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_identity(email: &str, role: Role) -> NewIdentity {
        NewIdentity {
            name: "  Test User ".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_email_unique_across_roles_case_insensitive() {
        let store = MemoryIdentityStore::new();
        let now = Utc::now();
        let first = store
            .insert(new_identity("Bob@Example.com", Role::Manager), now)
            .await
            .unwrap();
        assert!(first.is_some());
        let second = store
            .insert(new_identity(" bob@example.COM ", Role::Employee), now)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_insert_normalizes() {
        let store = MemoryIdentityStore::new();
        let identity = store
            .insert(new_identity(" Carol@Example.com", Role::Employee), Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(identity.email, "carol@example.com");
        assert_eq!(identity.name, "Test User");
        let found = store.find_by_email("CAROL@example.com").await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(identity.id));
    }

    #[tokio::test]
    async fn test_list_newest_first_and_delete() {
        let store = MemoryIdentityStore::new();
        let now = Utc::now();
        let old = store
            .insert(new_identity("a@x.io", Role::Employee), now - Duration::days(1))
            .await
            .unwrap()
            .unwrap();
        let new = store
            .insert(new_identity("b@x.io", Role::Employee), now)
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<Uuid> = store.list_all().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);

        assert!(store.delete(old.id).await.unwrap());
        assert!(!store.delete(old.id).await.unwrap());
        assert_eq!(store.count_by_role(Role::Employee).await.unwrap(), 1);
    }
}
