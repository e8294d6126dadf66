//! Route definitions for the LeaveDesk HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::extract::OriginalUri;
use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use leavedesk_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(leave_routes())
        .merge(ticket_routes())
        .merge(user_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/auth/register-by-admin",
            post(handlers::auth::register_by_admin),
        )
}

/// Leave submission, history and review
fn leave_routes() -> Router<AppState> {
    Router::new()
        .route("/leaves", post(handlers::leave::submit))
        .route("/leaves/my", get(handlers::leave::list_mine))
        .route("/leaves/summary/my", get(handlers::leave::summary_mine))
        .route("/leaves/review-queue", get(handlers::leave::review_queue))
        .route(
            "/leaves/analytics/manager",
            get(handlers::leave::manager_analytics),
        )
        .route("/leaves/{id}/status", patch(handlers::leave::decide))
}

/// Support tickets
fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tickets",
            post(handlers::ticket::create).get(handlers::ticket::list_all),
        )
        .route("/tickets/my", get(handlers::ticket::list_mine))
        .route("/tickets/{id}/reply", patch(handlers::ticket::reply))
}

/// Admin user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/users/analytics", get(handlers::users::analytics))
        .route("/users/{id}", delete(handlers::users::delete_user))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    AppError::not_found(format!("Route not found: {}", uri.path())).into()
}
