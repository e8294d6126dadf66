//! Health check handler.

use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> ApiResult<ApiResponse<HealthResponse>> {
    let store = match state.stores.database() {
        Some(db) => {
            db.health_check().await?;
            "postgres"
        }
        None => "memory",
    };

    Ok(ApiResponse::with_message(
        "API is running",
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.to_string(),
        },
    ))
}
