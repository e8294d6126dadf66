//! Authentication configuration.

use serde::{Deserialize, Serialize};

const MAX_TTL_HOURS: u64 = 24 * 365 * 10;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// The token lifetime as a `chrono::Duration`, capped at ten years.
    pub fn jwt_ttl(&self) -> chrono::Duration {
        let hours = self.jwt_ttl_hours.min(MAX_TTL_HOURS) as i64;
        chrono::Duration::hours(hours)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_hours: default_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    6
}
