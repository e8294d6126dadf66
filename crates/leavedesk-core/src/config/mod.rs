//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod leave;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::leave::LeaveConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{StoreConfig, StoreProvider};

use crate::error::AppError;

/// Environment variable naming the directory that holds the TOML files.
pub const CONFIG_DIR_ENV: &str = "LEAVEDESK_CONFIG_DIR";

/// Environment variable naming the overlay file (`config/{env}.toml`).
pub const ENV_NAME_ENV: &str = "LEAVEDESK_ENV";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Which store backend to wire.
    #[serde(default)]
    pub store: StoreConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Leave lifecycle settings.
    #[serde(default)]
    pub leave: LeaveConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `{dir}/default.toml` with an environment-specific overlay
    /// `{dir}/{env}.toml` and environment variables prefixed with
    /// `LEAVEDESK__` (e.g. `LEAVEDESK__AUTH__JWT_SECRET`).
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEAVEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load using `LEAVEDESK_CONFIG_DIR` / `LEAVEDESK_ENV`, falling back to
    /// `config` and `development`.
    pub fn load_from_env() -> Result<Self, AppError> {
        let dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| "config".to_string());
        let env = std::env::var(ENV_NAME_ENV).unwrap_or_else(|_| "development".to_string());
        Self::load(&dir, &env)
    }

    /// Reject combinations that cannot produce a working server.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.jwt_ttl_hours == 0 {
            return Err(AppError::configuration("auth.jwt_ttl_hours must be positive"));
        }
        if self.leave.pending_expiry_hours == 0 {
            return Err(AppError::configuration(
                "leave.pending_expiry_hours must be positive",
            ));
        }
        if self.store.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when store.provider = \"postgres\"",
            ));
        }
        Ok(())
    }
}
