//! Axum middleware stack and route guards.

pub mod cors;
pub mod logging;
pub mod rbac;
