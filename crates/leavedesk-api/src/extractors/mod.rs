//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, Authorized};
pub use json::ValidatedJson;
