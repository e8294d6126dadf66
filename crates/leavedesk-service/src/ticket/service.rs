//! Ticket creation, listing and admin replies.

use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use leavedesk_auth::rbac::{Operation, RbacEnforcer};
use leavedesk_core::error::AppError;
use leavedesk_core::traits::Clock;
use leavedesk_database::store::TicketStore;
use leavedesk_entity::ticket::{
    NewTicket, Ticket, TicketCategory, TicketPriority, TicketReply, TicketStatus,
};

use crate::context::RequestContext;

/// Accepted subject length in characters, after trimming.
pub const SUBJECT_LEN: RangeInclusive<usize> = 4..=120;
/// Accepted description length in characters, after trimming.
pub const DESCRIPTION_LEN: RangeInclusive<usize> = 10..=1500;
/// Accepted reply length in characters, after trimming.
pub const REPLY_LEN: RangeInclusive<usize> = 2..=1500;

/// An employee's new ticket.
#[derive(Debug, Clone)]
pub struct TicketSubmission {
    pub category: TicketCategory,
    /// Defaults to `medium`.
    pub priority: Option<TicketPriority>,
    pub subject: String,
    pub description: String,
}

/// An admin reply and the status it sets.
#[derive(Debug, Clone)]
pub struct TicketReplyInput {
    pub status: TicketStatus,
    pub reply: String,
}

/// Implements the ticket workflow.
#[derive(Debug, Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketStore>,
    rbac: Arc<RbacEnforcer>,
    clock: Arc<dyn Clock>,
}

impl TicketService {
    /// Creates a new ticket service.
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        rbac: Arc<RbacEnforcer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tickets,
            rbac,
            clock,
        }
    }

    /// Raise a ticket as the acting employee.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: TicketSubmission,
    ) -> Result<Ticket, AppError> {
        self.rbac.require(ctx.role, Operation::CreateTicket)?;

        let subject = bounded("Subject", &input.subject, SUBJECT_LEN)?;
        let description = bounded("Description", &input.description, DESCRIPTION_LEN)?;

        let ticket = self
            .tickets
            .insert(NewTicket {
                employee_id: ctx.identity_id,
                employee_name: ctx.name.clone(),
                employee_email: ctx.email.clone(),
                category: input.category,
                priority: input.priority.unwrap_or_default(),
                subject,
                description,
                created_at: self.clock.now(),
            })
            .await?;

        info!(
            ticket_id = %ticket.id,
            employee_id = %ticket.employee_id,
            category = %ticket.category,
            priority = %ticket.priority,
            "Support ticket raised"
        );
        Ok(ticket)
    }

    /// The acting employee's tickets, newest first.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Ticket>, AppError> {
        self.rbac.require(ctx.role, Operation::ListOwnTickets)?;
        self.tickets.find_by_employee(ctx.identity_id).await
    }

    /// Every ticket matching the filters, newest first.
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        status: Option<TicketStatus>,
        category: Option<TicketCategory>,
    ) -> Result<Vec<Ticket>, AppError> {
        self.rbac.require(ctx.role, Operation::ListAllTickets)?;
        self.tickets.find_filtered(status, category).await
    }

    /// Overwrite the reply and status of a ticket. Any status may follow
    /// any other.
    pub async fn reply(
        &self,
        ctx: &RequestContext,
        ticket_id: Uuid,
        input: TicketReplyInput,
    ) -> Result<Ticket, AppError> {
        self.rbac.require(ctx.role, Operation::ReplyTicket)?;
        let admin_reply = bounded("Reply", &input.reply, REPLY_LEN)?;

        let reply = TicketReply {
            admin_reply,
            status: input.status,
            replied_by_admin_id: ctx.identity_id,
            replied_by_admin_name: ctx.name.clone(),
            replied_at: self.clock.now(),
        };

        let ticket = self
            .tickets
            .apply_reply(ticket_id, &reply)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        info!(
            ticket_id = %ticket.id,
            admin_id = %ctx.identity_id,
            status = %ticket.status,
            "Support ticket updated"
        );
        Ok(ticket)
    }
}

/// Trim `value` and check its character count.
fn bounded(field: &str, value: &str, range: RangeInclusive<usize>) -> Result<String, AppError> {
    let trimmed = value.trim();
    if !range.contains(&trimmed.chars().count()) {
        return Err(AppError::validation(format!(
            "{field} must be {}-{} characters",
            range.start(),
            range.end()
        )));
    }
    Ok(trimmed.to_string())
}
