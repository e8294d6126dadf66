//! Application builder: wires services, router and middleware into an
//! Axum app, and runs the server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use leavedesk_auth::jwt::{JwtDecoder, JwtEncoder};
use leavedesk_auth::password::{PasswordHasher, PasswordValidator};
use leavedesk_auth::rbac::RbacEnforcer;
use leavedesk_core::config::AppConfig;
use leavedesk_core::error::AppError;
use leavedesk_core::traits::{Clock, SystemClock};
use leavedesk_database::Stores;
use leavedesk_service::{
    AnalyticsService, ExpirySweeper, IdentityService, LeaveService, TicketService,
    UserAdminService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Constructs every service over `stores`, reading "now" from `clock`.
pub fn build_state(config: AppConfig, clock: Arc<dyn Clock>, stores: Stores) -> AppState {
    let rbac = Arc::new(RbacEnforcer::new());

    // ── Auth ─────────────────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let encoder = Arc::new(JwtEncoder::new(&config.auth, Arc::clone(&clock)));
    let decoder = Arc::new(JwtDecoder::new(&config.auth, Arc::clone(&clock)));

    // ── Services ─────────────────────────────────────────────────
    let identity = Arc::new(IdentityService::new(
        Arc::clone(&stores.identities),
        hasher,
        validator,
        encoder,
        decoder,
        Arc::clone(&rbac),
        Arc::clone(&clock),
    ));
    let leave = Arc::new(LeaveService::new(
        Arc::clone(&stores.leaves),
        Arc::clone(&rbac),
        Arc::clone(&clock),
        config.leave.pending_expiry(),
    ));
    let ticket = Arc::new(TicketService::new(
        Arc::clone(&stores.tickets),
        Arc::clone(&rbac),
        Arc::clone(&clock),
    ));
    let users = Arc::new(UserAdminService::new(
        Arc::clone(&stores.identities),
        Arc::clone(&identity),
        Arc::clone(&rbac),
    ));
    let analytics = Arc::new(AnalyticsService::new(
        Arc::clone(&stores.identities),
        Arc::clone(&stores.leaves),
        Arc::clone(&rbac),
        Arc::clone(&clock),
    ));

    AppState {
        config: Arc::new(config),
        clock,
        stores,
        rbac,
        identity,
        leave,
        ticket,
        users,
        analytics,
    }
}

/// Runs the LeaveDesk server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LeaveDesk server...");

    // ── Step 1: Connect stores ───────────────────────────────────
    let stores = Stores::connect(&config).await?;

    // ── Step 2: Build services ───────────────────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = build_state(config.clone(), clock, stores.clone());

    // ── Step 3: Shutdown channel & expiry sweeper ────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if config.leave.sweep_interval_seconds > 0 {
        let sweeper = ExpirySweeper::new(
            Arc::clone(&state.leave),
            Duration::from_secs(config.leave.sweep_interval_seconds),
        );
        Some(sweeper.spawn(shutdown_rx))
    } else {
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(
        %addr,
        store = ?config.store.provider,
        "LeaveDesk server listening"
    );

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Drain background work ────────────────────────────
    if let Some(handle) = sweeper_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Expiry sweeper did not stop within the grace period");
        }
    }
    stores.close().await;

    tracing::info!("LeaveDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
