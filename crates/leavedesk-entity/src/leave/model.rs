//! Leave request entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{LeaveStatus, LeaveType};

/// A leave request submitted by an employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning employee. Not a foreign key; the request outlives the identity.
    pub employee_id: Uuid,
    /// Employee name at submission time.
    pub employee_name: String,
    /// Employee email at submission time.
    pub employee_email: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave.
    pub to_date: NaiveDate,
    /// Free-text justification.
    pub reason: String,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// Manager who decided the request.
    pub reviewed_by_id: Option<Uuid>,
    /// Name of the deciding manager.
    pub reviewed_by_name: Option<String>,
    /// Comment left with the decision.
    pub manager_comment: Option<String>,
    /// Submission time; the expiry clock starts here.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Whether this pending request is older than `threshold` at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: chrono::Duration) -> bool {
        self.status == LeaveStatus::Pending && self.created_at < now - threshold
    }
}

/// Data required to create a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    /// Owning employee.
    pub employee_id: Uuid,
    /// Employee name snapshot.
    pub employee_name: String,
    /// Employee email snapshot.
    pub employee_email: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day.
    pub from_date: NaiveDate,
    /// Last day.
    pub to_date: NaiveDate,
    /// Justification, already trimmed.
    pub reason: String,
    /// Creation time from the injected clock.
    pub created_at: DateTime<Utc>,
}

/// A manager decision to apply to a pending request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveReview {
    /// `Approved` or `Rejected`.
    pub status: LeaveStatus,
    /// Deciding manager.
    pub reviewed_by_id: Uuid,
    /// Deciding manager's name.
    pub reviewed_by_name: String,
    /// Comment; empty when none was given.
    pub manager_comment: String,
    /// Decision time.
    pub reviewed_at: DateTime<Utc>,
}

/// Per-status counts for an employee's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSummary {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// Minimal projection used by manager analytics.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaveDigest {
    pub id: Uuid,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
}
