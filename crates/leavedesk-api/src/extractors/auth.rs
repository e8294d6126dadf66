//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, resolves it to a live identity, and injects the request context.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::request::Parts;
use tracing::debug;

use leavedesk_core::error::AppError;
use leavedesk_service::context::RequestContext;

use crate::error::ApiError;
use crate::middleware::rbac::Guard;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Not authorized, token missing"))?;

        let identity = state.identity.authenticate(token).await?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ctx = RequestContext::for_identity(&identity, state.clock.now())
            .with_client(ip_address, user_agent);

        debug!(identity_id = %ctx.identity_id, role = %ctx.role, "Request authenticated");
        Ok(AuthUser(ctx))
    }
}

/// An authenticated context whose role passed the guard `G`.
///
/// Extracted from the request head, so the role check runs before any
/// body is read or validated.
#[derive(Debug, Clone)]
pub struct Authorized<G> {
    ctx: RequestContext,
    _guard: PhantomData<fn() -> G>,
}

impl<G> Authorized<G> {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }
}

impl<G> std::ops::Deref for Authorized<G> {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

impl<G: Guard> FromRequestParts<AppState> for Authorized<G> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        state.rbac.require(ctx.role, G::OPERATION)?;
        Ok(Self {
            ctx,
            _guard: PhantomData,
        })
    }
}
