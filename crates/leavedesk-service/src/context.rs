//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leavedesk_entity::identity::{Identity, Role};

/// Context for the current authenticated request.
///
/// Built after the bearer token has been resolved to a live identity and
/// passed into service methods so that every operation knows *who* is
/// acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting identity's ID.
    pub identity_id: Uuid,
    /// The acting identity's role.
    pub role: Role,
    /// Display name, snapshotted onto records the actor creates.
    pub name: String,
    /// Email, snapshotted onto records the actor creates.
    pub email: String,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `identity`.
    pub fn for_identity(identity: &Identity, request_time: DateTime<Utc>) -> Self {
        Self {
            identity_id: identity.id,
            role: identity.role,
            name: identity.name.clone(),
            email: identity.email.clone(),
            ip_address: None,
            user_agent: None,
            request_time,
        }
    }

    /// Attach client connection details.
    pub fn with_client(mut self, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }

    /// Returns whether the current identity is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
