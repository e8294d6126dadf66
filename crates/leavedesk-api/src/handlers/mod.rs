//! HTTP request handlers grouped by domain.

pub mod auth;
pub mod health;
pub mod leave;
pub mod ticket;
pub mod users;

use uuid::Uuid;

use leavedesk_core::error::AppError;

/// Parse a path id. A malformed id cannot name an entity, so it is
/// reported the same way as a missing one.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found))
}
