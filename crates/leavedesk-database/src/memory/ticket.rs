use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use leavedesk_core::result::AppResult;
use leavedesk_entity::ticket::{NewTicket, Ticket, TicketCategory, TicketReply, TicketStatus};

use super::{Row, newest_first};
use crate::store::TicketStore;

/// Process-local ticket store.
#[derive(Debug, Default)]
pub struct MemoryTicketStore {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    next_seq: u64,
    rows: Vec<Row<Ticket>>,
}

impl MemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn insert(&self, data: NewTicket) -> AppResult<Ticket> {
        let ticket = Ticket {
            id: Uuid::now_v7(),
            employee_id: data.employee_id,
            employee_name: data.employee_name,
            employee_email: data.employee_email,
            category: data.category,
            priority: data.priority,
            subject: data.subject,
            description: data.description,
            status: TicketStatus::Open,
            admin_reply: None,
            replied_by_admin_id: None,
            replied_by_admin_name: None,
            replied_at: None,
            created_at: data.created_at,
            updated_at: data.created_at,
        };
        let mut table = self.inner.lock().await;
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.push(Row {
            seq,
            value: ticket.clone(),
        });
        Ok(ticket)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>> {
        let table = self.inner.lock().await;
        Ok(table
            .rows
            .iter()
            .find(|r| r.value.id == id)
            .map(|r| r.value.clone()))
    }

    async fn find_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Ticket>> {
        let table = self.inner.lock().await;
        Ok(newest_first(
            &table.rows,
            |t| t.created_at,
            |t| t.employee_id == employee_id,
        ))
    }

    async fn find_filtered(
        &self,
        status: Option<TicketStatus>,
        category: Option<TicketCategory>,
    ) -> AppResult<Vec<Ticket>> {
        let table = self.inner.lock().await;
        Ok(newest_first(
            &table.rows,
            |t| t.created_at,
            |t| {
                status.is_none_or(|s| s == t.status) && category.is_none_or(|c| c == t.category)
            },
        ))
    }

    async fn apply_reply(&self, id: Uuid, reply: &TicketReply) -> AppResult<Option<Ticket>> {
        let mut table = self.inner.lock().await;
        let Some(row) = table.rows.iter_mut().find(|r| r.value.id == id) else {
            return Ok(None);
        };

        let ticket = &mut row.value;
        ticket.admin_reply = Some(reply.admin_reply.clone());
        ticket.status = reply.status;
        ticket.replied_by_admin_id = Some(reply.replied_by_admin_id);
        ticket.replied_by_admin_name = Some(reply.replied_by_admin_name.clone());
        ticket.replied_at = Some(reply.replied_at);
        ticket.updated_at = reply.replied_at;
        Ok(Some(ticket.clone()))
    }
}
