//! Support ticket handlers.

use axum::extract::{Path, Query, State};
use axum::response::Response;

use leavedesk_entity::ticket::Ticket;
use leavedesk_service::ticket::{TicketReplyInput, TicketSubmission};

use crate::dto::request::{CreateTicketRequest, ReplyTicketRequest, TicketFilterQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{Authorized, ValidatedJson};
use crate::handlers::parse_id;
use crate::middleware::rbac;
use crate::state::AppState;

/// POST /api/tickets
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<rbac::CreateTicket>,
    ValidatedJson(req): ValidatedJson<CreateTicketRequest>,
) -> ApiResult<Response> {
    let input = TicketSubmission {
        category: req.category()?,
        priority: req.priority()?,
        subject: req.subject,
        description: req.description,
    };
    let ticket = state.ticket.create(auth.context(), input).await?;
    Ok(ApiResponse::with_message("Support ticket raised successfully", ticket).created())
}

/// GET /api/tickets/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: Authorized<rbac::ListOwnTickets>,
) -> ApiResult<ApiResponse<Vec<Ticket>>> {
    let tickets = state.ticket.list_mine(auth.context()).await?;
    Ok(ApiResponse::ok(tickets))
}

/// GET /api/tickets?status=&category=
pub async fn list_all(
    State(state): State<AppState>,
    auth: Authorized<rbac::ListAllTickets>,
    Query(query): Query<TicketFilterQuery>,
) -> ApiResult<ApiResponse<Vec<Ticket>>> {
    let (status, category) = query.parse()?;
    let tickets = state
        .ticket
        .list_all(auth.context(), status, category)
        .await?;
    Ok(ApiResponse::ok(tickets))
}

/// PATCH /api/tickets/{id}/reply
pub async fn reply(
    State(state): State<AppState>,
    auth: Authorized<rbac::ReplyTicket>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ReplyTicketRequest>,
) -> ApiResult<ApiResponse<Ticket>> {
    let id = parse_id(&id, "Ticket not found")?;
    let input = TicketReplyInput {
        status: req.status()?,
        reply: req.admin_reply,
    };
    let ticket = state.ticket.reply(auth.context(), id, input).await?;
    Ok(ApiResponse::with_message("Ticket updated successfully", ticket))
}
