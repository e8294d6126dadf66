//! Admin user management handlers.

use axum::extract::{Path, State};
use axum::response::Response;

use leavedesk_entity::identity::Identity;
use leavedesk_service::admin::{NewUserInput, UserAnalytics};

use crate::dto::request::CreateUserRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{Authorized, ValidatedJson};
use crate::handlers::parse_id;
use crate::middleware::rbac;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: Authorized<rbac::ListUsers>,
) -> ApiResult<ApiResponse<Vec<Identity>>> {
    let users = state.users.list_users(auth.context()).await?;
    Ok(ApiResponse::ok(users))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: Authorized<rbac::CreateUser>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Response> {
    let input = NewUserInput {
        role: req.role()?,
        name: req.name,
        email: req.email,
        password: req.password,
    };
    let user = state.users.create_user(auth.context(), input).await?;
    Ok(ApiResponse::with_message("User created", user).created())
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: Authorized<rbac::DeleteUser>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Option<()>>> {
    let id = parse_id(&id, "User not found")?;
    state.users.delete_user(auth.context(), id).await?;
    Ok(ApiResponse::with_message("User deleted", None))
}

/// GET /api/users/analytics
pub async fn analytics(
    State(state): State<AppState>,
    auth: Authorized<rbac::UserAnalytics>,
) -> ApiResult<ApiResponse<UserAnalytics>> {
    let analytics = state.analytics.user_analytics(auth.context()).await?;
    Ok(ApiResponse::ok(analytics))
}
