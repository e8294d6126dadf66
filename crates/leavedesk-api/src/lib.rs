//! # leavedesk-api
//!
//! HTTP API layer for LeaveDesk built on Axum.
//!
//! Provides the REST endpoints for authentication, leave requests, support
//! tickets and user administration, together with middleware (logging,
//! CORS), extractors, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
