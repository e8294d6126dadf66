//! JWT token validation.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use leavedesk_core::config::AuthConfig;
use leavedesk_core::error::AppError;
use leavedesk_core::traits::Clock;

use super::claims::Claims;

/// Seconds of tolerated clock skew on `exp`.
const LEEWAY_SECONDS: i64 = 5;

/// Validates token signatures and expiry.
///
/// Expiry is checked against the injected clock rather than wall time.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Decode and validate a token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Rejected bearer token");
                AppError::unauthorized("Not authorized, token invalid")
            })?;

        if claims.exp + LEEWAY_SECONDS < self.clock.now().timestamp() {
            return Err(AppError::unauthorized("Not authorized, token expired"));
        }

        Ok(claims)
    }
}
