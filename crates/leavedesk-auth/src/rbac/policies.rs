//! The operation-to-roles policy table.

use serde::{Deserialize, Serialize};

use leavedesk_entity::identity::Role;

/// Every authenticated operation the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read one's own identity.
    Me,
    /// Register an identity with a chosen role.
    RegisterByAdmin,

    // Leave requests
    /// Submit a leave request.
    SubmitLeave,
    /// List one's own leave requests.
    ListOwnLeaves,
    /// Per-status counts of one's own requests.
    OwnLeaveSummary,
    /// List pending requests awaiting review.
    ReviewQueue,
    /// Organization-wide leave counts and digest.
    ManagerAnalytics,
    /// Approve or reject a pending request.
    DecideLeave,

    // Tickets
    /// Raise a support ticket.
    CreateTicket,
    /// List one's own tickets.
    ListOwnTickets,
    /// List every ticket.
    ListAllTickets,
    /// Reply to a ticket and set its status.
    ReplyTicket,

    // User administration
    /// List every identity.
    ListUsers,
    /// Create an identity of any role.
    CreateUser,
    /// Delete an identity.
    DeleteUser,
    /// Organization-wide user and leave analytics.
    UserAnalytics,
}

const ANY: &[Role] = &[Role::Admin, Role::Manager, Role::Employee];
const ADMIN: &[Role] = &[Role::Admin];
const MANAGER: &[Role] = &[Role::Manager];
const EMPLOYEE: &[Role] = &[Role::Employee];

/// Static policy table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacPolicies;

impl RbacPolicies {
    /// Creates the policy table.
    pub fn new() -> Self {
        Self
    }

    /// Roles permitted to perform `op`.
    pub fn required_roles(&self, op: Operation) -> &'static [Role] {
        match op {
            Operation::Me => ANY,
            Operation::RegisterByAdmin => ADMIN,
            Operation::SubmitLeave | Operation::ListOwnLeaves | Operation::OwnLeaveSummary => {
                EMPLOYEE
            }
            Operation::ReviewQueue | Operation::ManagerAnalytics | Operation::DecideLeave => {
                MANAGER
            }
            Operation::CreateTicket | Operation::ListOwnTickets => EMPLOYEE,
            Operation::ListAllTickets | Operation::ReplyTicket => ADMIN,
            Operation::ListUsers
            | Operation::CreateUser
            | Operation::DeleteUser
            | Operation::UserAnalytics => ADMIN,
        }
    }

    /// Whether `role` may perform `op`.
    pub fn permits(&self, role: Role, op: Operation) -> bool {
        allowed(role, self.required_roles(op))
    }
}

/// Membership test of `role` in `required`.
pub fn allowed(role: Role, required: &[Role]) -> bool {
    required.contains(&role)
}
