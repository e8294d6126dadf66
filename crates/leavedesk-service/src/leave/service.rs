//! Leave lifecycle engine.
//!
//! A request is `pending` until a manager approves or rejects it, or until
//! it has been pending longer than the expiry threshold, at which point it
//! becomes `expired`. Expiry is applied lazily: every status-sensitive read
//! or write first runs [`LeaveService::expire_stale`].

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use leavedesk_auth::rbac::{Operation, RbacEnforcer};
use leavedesk_core::error::AppError;
use leavedesk_core::traits::Clock;
use leavedesk_database::store::LeaveStore;
use leavedesk_entity::leave::{
    LeaveDecision, LeaveDigest, LeaveRequest, LeaveReview, LeaveStatus, LeaveSummary, LeaveType,
    NewLeaveRequest,
};

use crate::context::RequestContext;

/// Longest manager comment accepted, in characters.
pub const MAX_COMMENT_LEN: usize = 500;

/// An employee's leave application.
#[derive(Debug, Clone)]
pub struct LeaveSubmission {
    pub leave_type: LeaveType,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
}

/// Organization-wide leave counts plus a digest of every request.
#[derive(Debug, Clone, Serialize)]
pub struct ManagerAnalytics {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub requests: Vec<LeaveDigest>,
}

/// Implements submission, review and expiry of leave requests.
#[derive(Debug, Clone)]
pub struct LeaveService {
    leaves: Arc<dyn LeaveStore>,
    rbac: Arc<RbacEnforcer>,
    clock: Arc<dyn Clock>,
    expiry: Duration,
}

impl LeaveService {
    /// Creates a new leave service expiring pending requests after `expiry`.
    pub fn new(
        leaves: Arc<dyn LeaveStore>,
        rbac: Arc<RbacEnforcer>,
        clock: Arc<dyn Clock>,
        expiry: Duration,
    ) -> Self {
        Self {
            leaves,
            rbac,
            clock,
            expiry,
        }
    }

    /// The configured expiry threshold.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Expire every pending request older than the threshold, optionally
    /// only those of one employee. Returns how many were expired.
    pub async fn expire_stale(&self, employee_id: Option<Uuid>) -> Result<u64, AppError> {
        let now = self.clock.now();
        let cutoff = now - self.expiry;
        let expired = self
            .leaves
            .expire_pending_before(cutoff, now, employee_id)
            .await?;

        if expired > 0 {
            info!(
                expired,
                employee_id = ?employee_id,
                cutoff = %cutoff,
                "Expired stale leave requests"
            );
        }
        Ok(expired)
    }

    /// Submit a new request for the acting employee.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        input: LeaveSubmission,
    ) -> Result<LeaveRequest, AppError> {
        self.rbac.require(ctx.role, Operation::SubmitLeave)?;

        if input.from_date > input.to_date {
            return Err(AppError::validation("from_date must be before to_date"));
        }
        let reason = input.reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("Reason is required"));
        }

        self.expire_stale(Some(ctx.identity_id)).await?;

        let data = NewLeaveRequest {
            employee_id: ctx.identity_id,
            employee_name: ctx.name.clone(),
            employee_email: ctx.email.clone(),
            leave_type: input.leave_type,
            from_date: input.from_date,
            to_date: input.to_date,
            reason: reason.to_string(),
            created_at: self.clock.now(),
        };

        let Some(request) = self.leaves.insert_if_no_pending(data).await? else {
            return Err(AppError::conflict(format!(
                "You already have a pending leave request. Please wait for review or expiry after {}.",
                describe(self.expiry)
            )));
        };

        info!(
            leave_id = %request.id,
            employee_id = %request.employee_id,
            leave_type = %request.leave_type,
            from = %request.from_date,
            to = %request.to_date,
            "Leave request submitted"
        );
        Ok(request)
    }

    /// The acting employee's requests, newest first.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<LeaveRequest>, AppError> {
        self.rbac.require(ctx.role, Operation::ListOwnLeaves)?;
        self.expire_stale(Some(ctx.identity_id)).await?;
        self.leaves.find_by_employee(ctx.identity_id).await
    }

    /// Pending, approved and rejected counts for the acting employee.
    /// Expired requests are not counted.
    pub async fn summary_mine(&self, ctx: &RequestContext) -> Result<LeaveSummary, AppError> {
        self.rbac.require(ctx.role, Operation::OwnLeaveSummary)?;
        self.expire_stale(Some(ctx.identity_id)).await?;

        let me = Some(ctx.identity_id);
        Ok(LeaveSummary {
            pending: self.leaves.count_by_status(LeaveStatus::Pending, me).await?,
            approved: self.leaves.count_by_status(LeaveStatus::Approved, me).await?,
            rejected: self.leaves.count_by_status(LeaveStatus::Rejected, me).await?,
        })
    }

    /// Every request still awaiting review, newest first.
    pub async fn review_queue(&self, ctx: &RequestContext) -> Result<Vec<LeaveRequest>, AppError> {
        self.rbac.require(ctx.role, Operation::ReviewQueue)?;
        self.expire_stale(None).await?;
        self.leaves.find_by_status(LeaveStatus::Pending).await
    }

    /// Approve or reject a pending request.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        leave_id: Uuid,
        decision: LeaveDecision,
        comment: Option<String>,
    ) -> Result<LeaveRequest, AppError> {
        self.rbac.require(ctx.role, Operation::DecideLeave)?;

        let comment = comment.map(|c| c.trim().to_string()).unwrap_or_default();
        if comment.chars().count() > MAX_COMMENT_LEN {
            return Err(AppError::validation(format!(
                "Manager comment must be at most {MAX_COMMENT_LEN} characters"
            )));
        }

        self.expire_stale(None).await?;

        let current = self
            .leaves
            .find_by_id(leave_id)
            .await?
            .ok_or_else(|| AppError::not_found("Leave request not found"))?;
        if current.status != LeaveStatus::Pending {
            return Err(self.not_reviewable(current.status));
        }

        let review = LeaveReview {
            status: decision.into(),
            reviewed_by_id: ctx.identity_id,
            reviewed_by_name: ctx.name.clone(),
            manager_comment: comment,
            reviewed_at: self.clock.now(),
        };

        match self.leaves.decide_if_pending(leave_id, &review).await? {
            Some(updated) => {
                info!(
                    leave_id = %updated.id,
                    employee_id = %updated.employee_id,
                    manager_id = %ctx.identity_id,
                    status = %updated.status,
                    "Leave request reviewed"
                );
                Ok(updated)
            }
            None => {
                // Another reviewer or the sweeper got there between the read and the update.
                let status = self
                    .leaves
                    .find_by_id(leave_id)
                    .await?
                    .map(|r| r.status)
                    .ok_or_else(|| AppError::not_found("Leave request not found"))?;
                warn!(leave_id = %leave_id, %status, "Lost leave review race");
                Err(self.not_reviewable(status))
            }
        }
    }

    /// Organization-wide counts and the `(id, status, created_at)` list.
    pub async fn manager_analytics(
        &self,
        ctx: &RequestContext,
    ) -> Result<ManagerAnalytics, AppError> {
        self.rbac.require(ctx.role, Operation::ManagerAnalytics)?;

        Ok(ManagerAnalytics {
            pending: self.leaves.count_by_status(LeaveStatus::Pending, None).await?,
            approved: self.leaves.count_by_status(LeaveStatus::Approved, None).await?,
            rejected: self.leaves.count_by_status(LeaveStatus::Rejected, None).await?,
            requests: self.leaves.list_digests().await?,
        })
    }

    fn not_reviewable(&self, status: LeaveStatus) -> AppError {
        if status == LeaveStatus::Expired {
            AppError::conflict(format!(
                "Leave request expired after {} and can no longer be reviewed.",
                describe(self.expiry)
            ))
        } else {
            AppError::conflict("Leave already reviewed")
        }
    }
}

/// Human wording of the threshold: whole days when it divides evenly.
fn describe(threshold: Duration) -> String {
    let hours = threshold.num_hours();
    match (hours % 24, hours / 24) {
        (0, 1) => "1 day".to_string(),
        (0, days) => format!("{days} days"),
        (_, _) if hours == 1 => "1 hour".to_string(),
        _ => format!("{hours} hours"),
    }
}
