//! Support ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{TicketCategory, TicketPriority, TicketStatus};

/// A support ticket raised by an employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    /// Raising employee.
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_email: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    /// Latest admin reply; each reply overwrites the previous one.
    pub admin_reply: Option<String>,
    pub replied_by_admin_id: Option<Uuid>,
    pub replied_by_admin_name: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to open a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employee_email: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// An admin reply with the status it moves the ticket to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketReply {
    pub admin_reply: String,
    pub status: TicketStatus,
    pub replied_by_admin_id: Uuid,
    pub replied_by_admin_name: String,
    pub replied_at: DateTime<Utc>,
}
