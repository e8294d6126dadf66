//! Support ticket repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use leavedesk_core::error::{AppError, ErrorKind};
use leavedesk_core::result::AppResult;
use leavedesk_entity::ticket::{NewTicket, Ticket, TicketCategory, TicketReply, TicketStatus};

use crate::store::TicketStore;

/// Repository for the `tickets` table.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for TicketRepository {
    async fn insert(&self, data: NewTicket) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(
            "INSERT INTO tickets \
             (id, employee_id, employee_name, employee_email, category, priority, subject, \
              description, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'open', $9, $9) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(&data.employee_email)
        .bind(data.category)
        .bind(data.priority)
        .bind(&data.subject)
        .bind(&data.description)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create ticket", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))
    }

    async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets WHERE employee_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tickets", e))
    }

    async fn find_filtered(
        &self,
        status: Option<TicketStatus>,
        category: Option<TicketCategory>,
    ) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets \
             WHERE ($1::ticket_status IS NULL OR status = $1) \
             AND ($2::ticket_category IS NULL OR category = $2) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(status)
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tickets", e))
    }

    async fn apply_reply(&self, id: Uuid, reply: &TicketReply) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET admin_reply = $2, status = $3, replied_by_admin_id = $4, \
             replied_by_admin_name = $5, replied_at = $6, updated_at = $6 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&reply.admin_reply)
        .bind(reply.status)
        .bind(reply.replied_by_admin_id)
        .bind(&reply.replied_by_admin_name)
        .bind(reply.replied_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update ticket", e))
    }
}
