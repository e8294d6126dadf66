//! Identity entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A registered principal: admin, manager or employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Identity {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Normalized (trimmed, lowercased) email, unique across all roles.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role, fixed at creation.
    pub role: Role,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
    /// Last time the identity changed (password reset).
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Check if this identity is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to insert a new identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIdentity {
    /// Display name.
    pub name: String,
    /// Email; normalized by the store before insert.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

/// Trim and lowercase an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
