use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use leavedesk_core::result::AppResult;
use leavedesk_entity::leave::{
    LeaveDigest, LeaveRequest, LeaveReview, LeaveStatus, NewLeaveRequest,
};

use super::{Row, newest_first};
use crate::store::LeaveStore;

/// Process-local leave request store.
#[derive(Debug, Default)]
pub struct MemoryLeaveStore {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    next_seq: u64,
    rows: Vec<Row<LeaveRequest>>,
}

impl MemoryLeaveStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaveStore for MemoryLeaveStore {
    async fn expire_pending_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
        employee_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut table = self.inner.lock().await;
        let mut expired = 0;
        for row in table.rows.iter_mut() {
            let req = &mut row.value;
            let in_scope = employee_id.is_none_or(|e| e == req.employee_id);
            if in_scope && req.status == LeaveStatus::Pending && req.created_at < cutoff {
                req.status = LeaveStatus::Expired;
                req.updated_at = now;
                expired += 1;
            }
        }
        Ok(expired)
    }

    async fn insert_if_no_pending(&self, data: NewLeaveRequest) -> AppResult<Option<LeaveRequest>> {
        let mut table = self.inner.lock().await;
        let has_pending = table.rows.iter().any(|r| {
            r.value.employee_id == data.employee_id && r.value.status == LeaveStatus::Pending
        });
        if has_pending {
            return Ok(None);
        }

        let request = LeaveRequest {
            id: Uuid::now_v7(),
            employee_id: data.employee_id,
            employee_name: data.employee_name,
            employee_email: data.employee_email,
            leave_type: data.leave_type,
            from_date: data.from_date,
            to_date: data.to_date,
            reason: data.reason,
            status: LeaveStatus::Pending,
            reviewed_by_id: None,
            reviewed_by_name: None,
            manager_comment: None,
            created_at: data.created_at,
            updated_at: data.created_at,
        };
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.push(Row {
            seq,
            value: request.clone(),
        });
        Ok(Some(request))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>> {
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .iter()
            .find(|r| r.value.id == id)
            .map(|r| r.value.clone()))
    }

    async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>> {
        let table = self.inner.lock().await;
        Ok(newest_first(
            &table.rows,
            |r| r.created_at,
            |r| r.employee_id == employee_id,
        ))
    }

    async fn find_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>> {
        let table = self.inner.lock().await;
        Ok(newest_first(&table.rows, |r| r.created_at, |r| r.status == status))
    }

    async fn count_by_status(
        &self,
        status: LeaveStatus,
        employee_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|r| r.value.status == status)
            .filter(|r| employee_id.is_none_or(|e| e == r.value.employee_id))
            .count() as u64)
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(self.inner.lock().await.rows.len() as u64)
    }

    async fn decide_if_pending(
        &self,
        id: Uuid,
        review: &LeaveReview,
    ) -> AppResult<Option<LeaveRequest>> {
        let mut table = self.inner.lock().await;
        let Some(row) = table
            .rows
            .iter_mut()
            .find(|r| r.value.id == id && r.value.status == LeaveStatus::Pending)
        else {
            return Ok(None);
        };

        let req = &mut row.value;
        req.status = review.status;
        req.reviewed_by_id = Some(review.reviewed_by_id);
        req.reviewed_by_name = Some(review.reviewed_by_name.clone());
        req.manager_comment = Some(review.manager_comment.clone());
        req.updated_at = review.reviewed_at;
        Ok(Some(req.clone()))
    }

    async fn list_digests(&self) -> AppResult<Vec<LeaveDigest>> {
        let table = self.inner.lock().await;
        Ok(newest_first(&table.rows, |r| r.created_at, |_| true)
            .into_iter()
            .map(|r| LeaveDigest {
                id: r.id,
                status: r.status,
                created_at: r.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use leavedesk_entity::leave::LeaveType;

    fn submission(employee_id: Uuid, created_at: DateTime<Utc>) -> NewLeaveRequest {
        NewLeaveRequest {
            employee_id,
            employee_name: "Alice".into(),
            employee_email: "alice@example.com".into(),
            leave_type: LeaveType::Casual,
            from_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2026, 5, 6).unwrap(),
            reason: "family event".into(),
            created_at,
        }
    }

    fn review(status: LeaveStatus, at: DateTime<Utc>) -> LeaveReview {
        LeaveReview {
            status,
            reviewed_by_id: Uuid::new_v4(),
            reviewed_by_name: "Mona".into(),
            manager_comment: String::new(),
            reviewed_at: at,
        }
    }

    #[tokio::test]
    async fn test_second_pending_refused() {
        let store = MemoryLeaveStore::new();
        let emp = Uuid::new_v4();
        let now = Utc::now();
        assert!(store.insert_if_no_pending(submission(emp, now)).await.unwrap().is_some());
        assert!(store.insert_if_no_pending(submission(emp, now)).await.unwrap().is_none());
        assert!(
            store
                .insert_if_no_pending(submission(Uuid::new_v4(), now))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_expire_scoped_and_strict() {
        let store = MemoryLeaveStore::new();
        let now = Utc::now();
        let cutoff = now - Duration::hours(48);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store
            .insert_if_no_pending(submission(alice, cutoff - Duration::seconds(1)))
            .await
            .unwrap();
        store
            .insert_if_no_pending(submission(bob, cutoff - Duration::seconds(1)))
            .await
            .unwrap();

        assert_eq!(store.expire_pending_before(cutoff, now, Some(alice)).await.unwrap(), 1);
        assert_eq!(
            store.count_by_status(LeaveStatus::Pending, Some(bob)).await.unwrap(),
            1
        );
        assert_eq!(store.expire_pending_before(cutoff, now, None).await.unwrap(), 1);
        assert_eq!(store.count_by_status(LeaveStatus::Expired, None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exactly_at_cutoff_is_not_expired() {
        let store = MemoryLeaveStore::new();
        let now = Utc::now();
        let cutoff = now - Duration::hours(48);
        store
            .insert_if_no_pending(submission(Uuid::new_v4(), cutoff))
            .await
            .unwrap();
        assert_eq!(store.expire_pending_before(cutoff, now, None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_decide_only_once() {
        let store = MemoryLeaveStore::new();
        let now = Utc::now();
        let req = store
            .insert_if_no_pending(submission(Uuid::new_v4(), now))
            .await
            .unwrap()
            .unwrap();

        let approved = store
            .decide_if_pending(req.id, &review(LeaveStatus::Approved, now))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.manager_comment.as_deref(), Some(""));

        let again = store
            .decide_if_pending(req.id, &review(LeaveStatus::Rejected, now))
            .await
            .unwrap();
        assert!(again.is_none());
        let stored = store.find_by_id(req.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Approved);
    }
}
