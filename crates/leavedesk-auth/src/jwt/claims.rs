//! JWT claims payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leavedesk_core::error::AppError;
use leavedesk_entity::identity::Role;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity ID.
    pub sub: Uuid,
    /// Role name at issuance. Kept as a string so an unknown role can be
    /// told apart from a malformed token.
    pub role: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the identity ID from the subject claim.
    pub fn identity_id(&self) -> Uuid {
        self.sub
    }

    /// Parse the role claim.
    pub fn role(&self) -> Result<Role, AppError> {
        self.role
            .parse::<Role>()
            .map_err(|_| AppError::unauthorized("Invalid token role"))
    }
}
