//! Leave request handlers.

use axum::extract::{Path, State};
use axum::response::Response;

use leavedesk_entity::leave::{LeaveRequest, LeaveSummary};
use leavedesk_service::leave::{LeaveSubmission, ManagerAnalytics};

use crate::dto::request::{CreateLeaveRequest, DecideLeaveRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{Authorized, ValidatedJson};
use crate::handlers::parse_id;
use crate::middleware::rbac;
use crate::state::AppState;

/// POST /api/leaves
pub async fn submit(
    State(state): State<AppState>,
    auth: Authorized<rbac::SubmitLeave>,
    ValidatedJson(req): ValidatedJson<CreateLeaveRequest>,
) -> ApiResult<Response> {
    let input = LeaveSubmission {
        leave_type: req.leave_type()?,
        from_date: req.from_date()?,
        to_date: req.to_date()?,
        reason: req.reason,
    };
    let leave = state.leave.submit(auth.context(), input).await?;
    Ok(ApiResponse::with_message("Leave request submitted", leave).created())
}

/// GET /api/leaves/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: Authorized<rbac::ListOwnLeaves>,
) -> ApiResult<ApiResponse<Vec<LeaveRequest>>> {
    let leaves = state.leave.list_mine(auth.context()).await?;
    Ok(ApiResponse::ok(leaves))
}

/// GET /api/leaves/summary/my
pub async fn summary_mine(
    State(state): State<AppState>,
    auth: Authorized<rbac::OwnLeaveSummary>,
) -> ApiResult<ApiResponse<LeaveSummary>> {
    let summary = state.leave.summary_mine(auth.context()).await?;
    Ok(ApiResponse::ok(summary))
}

/// GET /api/leaves/review-queue
pub async fn review_queue(
    State(state): State<AppState>,
    auth: Authorized<rbac::ReviewQueue>,
) -> ApiResult<ApiResponse<Vec<LeaveRequest>>> {
    let leaves = state.leave.review_queue(auth.context()).await?;
    Ok(ApiResponse::ok(leaves))
}

/// GET /api/leaves/analytics/manager
pub async fn manager_analytics(
    State(state): State<AppState>,
    auth: Authorized<rbac::ManagerAnalytics>,
) -> ApiResult<ApiResponse<ManagerAnalytics>> {
    let analytics = state.leave.manager_analytics(auth.context()).await?;
    Ok(ApiResponse::ok(analytics))
}

/// PATCH /api/leaves/{id}/status
pub async fn decide(
    State(state): State<AppState>,
    auth: Authorized<rbac::DecideLeave>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<DecideLeaveRequest>,
) -> ApiResult<ApiResponse<LeaveRequest>> {
    let id = parse_id(&id, "Leave request not found")?;
    let decision = req.decision()?;
    let leave = state
        .leave
        .decide(auth.context(), id, decision, req.manager_comment)
        .await?;
    Ok(ApiResponse::with_message(format!("Leave {decision}"), leave))
}
