//! Store traits and the configured backend bundle.
//!
//! Services depend only on these traits. Each method that enforces an
//! invariant (single pending request, compare-and-set decision, unique
//! email) does so atomically inside the store, so concurrent callers can
//! never both win.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use leavedesk_core::config::{AppConfig, StoreProvider};
use leavedesk_core::result::AppResult;
use leavedesk_entity::identity::{Identity, NewIdentity, Role};
use leavedesk_entity::leave::{
    LeaveDigest, LeaveRequest, LeaveReview, LeaveStatus, NewLeaveRequest,
};
use leavedesk_entity::ticket::{NewTicket, Ticket, TicketCategory, TicketReply, TicketStatus};

use crate::connection::DatabasePool;
use crate::memory::{MemoryIdentityStore, MemoryLeaveStore, MemoryTicketStore};
use crate::repositories::{IdentityRepository, LeaveRepository, TicketRepository};

/// Persistence for identities of every role.
#[async_trait]
pub trait IdentityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look up by email. The argument is normalized before comparison.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Look up by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>>;

    /// Insert a new identity. Returns `None` if the normalized email is
    /// already taken by any role.
    async fn insert(&self, data: NewIdentity, now: DateTime<Utc>) -> AppResult<Option<Identity>>;

    /// Replace the password hash. Returns `false` if the identity is gone.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Delete an identity. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Every identity, newest first.
    async fn list_all(&self) -> AppResult<Vec<Identity>>;

    /// Identities holding `role`, newest first.
    async fn list_by_role(&self, role: Role) -> AppResult<Vec<Identity>>;

    /// Number of identities holding `role`.
    async fn count_by_role(&self, role: Role) -> AppResult<u64>;

    /// Number of identities created in `[from, to)`.
    async fn count_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<u64>;
}

/// Persistence for leave requests.
#[async_trait]
pub trait LeaveStore: Send + Sync + std::fmt::Debug + 'static {
    /// Move every pending request created strictly before `cutoff` to
    /// `expired`, optionally only for one employee. Returns the number of
    /// requests changed.
    async fn expire_pending_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
        employee_id: Option<Uuid>,
    ) -> AppResult<u64>;

    /// Insert a pending request unless the employee already has one.
    /// Returns `None` when a pending request exists.
    async fn insert_if_no_pending(&self, data: NewLeaveRequest) -> AppResult<Option<LeaveRequest>>;

    /// Look up by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>>;

    /// All requests of one employee, newest first.
    async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>>;

    /// All requests in `status`, newest first.
    async fn find_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>>;

    /// Count requests in `status`, optionally for one employee.
    async fn count_by_status(
        &self,
        status: LeaveStatus,
        employee_id: Option<Uuid>,
    ) -> AppResult<u64>;

    /// Total number of requests.
    async fn count_all(&self) -> AppResult<u64>;

    /// Apply a decision only if the request is still pending. Returns the
    /// updated request, or `None` if it was missing or no longer pending.
    async fn decide_if_pending(
        &self,
        id: Uuid,
        review: &LeaveReview,
    ) -> AppResult<Option<LeaveRequest>>;

    /// `(id, status, created_at)` of every request, newest first.
    async fn list_digests(&self) -> AppResult<Vec<LeaveDigest>>;
}

/// Persistence for support tickets.
#[async_trait]
pub trait TicketStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new open ticket.
    async fn insert(&self, data: NewTicket) -> AppResult<Ticket>;

    /// Look up by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>>;

    /// Tickets raised by one employee, newest first.
    async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Ticket>>;

    /// Tickets matching the optional filters, newest first.
    async fn find_filtered(
        &self,
        status: Option<TicketStatus>,
        category: Option<TicketCategory>,
    ) -> AppResult<Vec<Ticket>>;

    /// Overwrite the reply fields and status. Returns `None` if missing.
    async fn apply_reply(&self, id: Uuid, reply: &TicketReply) -> AppResult<Option<Ticket>>;
}

/// The three stores, backed by whichever provider is configured.
#[derive(Debug, Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityStore>,
    pub leaves: Arc<dyn LeaveStore>,
    pub tickets: Arc<dyn TicketStore>,
    database: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores selected by `store.provider`.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        match config.store.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL stores");
                let db = DatabasePool::connect(&config.database).await?;
                Ok(Self::postgres(db))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::memory())
            }
        }
    }

    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            identities: Arc::new(IdentityRepository::new(pool.clone())),
            leaves: Arc::new(LeaveRepository::new(pool.clone())),
            tickets: Arc::new(TicketRepository::new(pool)),
            database: Some(db),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            identities: Arc::new(MemoryIdentityStore::new()),
            leaves: Arc::new(MemoryLeaveStore::new()),
            tickets: Arc::new(MemoryTicketStore::new()),
            database: None,
        }
    }

    /// The database pool, when backed by PostgreSQL.
    pub fn database(&self) -> Option<&DatabasePool> {
        self.database.as_ref()
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(db) = &self.database {
            db.close().await;
        }
    }
}
