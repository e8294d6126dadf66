//! JWT token creation.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{EncodingKey, Header, encode};

use leavedesk_core::config::AuthConfig;
use leavedesk_core::error::AppError;
use leavedesk_core::traits::Clock;
use leavedesk_entity::identity::Identity;

use super::claims::Claims;

/// Creates signed HS256 tokens with a server-fixed lifetime.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.jwt_ttl(),
            clock,
        }
    }

    /// Issue a token for `identity`.
    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: identity.id,
            role: identity.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }
}
