//! RBAC enforcement.

use tracing::debug;

use leavedesk_core::error::AppError;
use leavedesk_entity::identity::Role;

use super::policies::{Operation, RbacPolicies};

/// Turns a policy miss into a `Forbidden` error.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy table.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Returns `Ok(())` if `role` may perform `op`, `Forbidden` otherwise.
    pub fn require(&self, role: Role, op: Operation) -> Result<(), AppError> {
        if self.policies.permits(role, op) {
            Ok(())
        } else {
            debug!(%role, operation = ?op, "Access denied");
            Err(AppError::forbidden("Forbidden for this role"))
        }
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}
