//! Auth handlers: register, login, me.

use axum::extract::State;
use axum::response::Response;

use leavedesk_entity::identity::Identity;
use leavedesk_service::identity::{AuthOutcome, Registration};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, Authorized, ValidatedJson};
use crate::middleware::rbac;
use crate::state::AppState;

fn registration(req: RegisterRequest) -> ApiResult<Registration> {
    let role = req.role()?;
    Ok(Registration {
        name: req.name,
        email: req.email,
        password: req.password,
        role,
    })
}

fn issued(message: &str, outcome: AuthOutcome) -> ApiResponse<AuthResponse> {
    ApiResponse::with_message(
        message,
        AuthResponse {
            token: outcome.token,
            user: outcome.identity,
        },
    )
}

/// POST /api/auth/register
///
/// Public; the role is always `employee`.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Response> {
    let outcome = state.identity.register(registration(req)?, None).await?;
    Ok(issued("User registered successfully", outcome).created())
}

/// POST /api/auth/register-by-admin
pub async fn register_by_admin(
    State(state): State<AppState>,
    auth: Authorized<rbac::RegisterByAdmin>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Response> {
    let outcome = state
        .identity
        .register_by_admin(auth.context(), registration(req)?)
        .await?;
    Ok(issued("User registered successfully", outcome).created())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthResponse>> {
    let outcome = state.identity.login(&req.email, &req.password).await?;
    Ok(issued("Login successful", outcome))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiResponse<Identity>> {
    let identity = state.identity.me(auth.context()).await?;
    Ok(ApiResponse::ok(identity))
}
