//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use leavedesk_auth::rbac::RbacEnforcer;
use leavedesk_core::config::AppConfig;
use leavedesk_core::traits::Clock;
use leavedesk_database::Stores;
use leavedesk_service::{
    AnalyticsService, IdentityService, LeaveService, TicketService, UserAdminService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Source of "now" for every time-dependent decision
    pub clock: Arc<dyn Clock>,

    // ── Infrastructure ───────────────────────────────────────
    /// Identity, leave and ticket stores
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Role-based access control enforcer
    pub rbac: Arc<RbacEnforcer>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login and token resolution
    pub identity: Arc<IdentityService>,
    /// Leave request lifecycle
    pub leave: Arc<LeaveService>,
    /// Support tickets
    pub ticket: Arc<TicketService>,
    /// Admin user management
    pub users: Arc<UserAdminService>,
    /// Admin analytics
    pub analytics: Arc<AnalyticsService>,
}
