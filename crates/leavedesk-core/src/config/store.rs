//! Store backend selection.

use serde::{Deserialize, Serialize};

/// Which implementation backs the identity, leave and ticket stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local maps; state is lost on restart.
    Memory,
}

/// Store configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `"postgres"` or `"memory"`.
    #[serde(default)]
    pub provider: StoreProvider,
}
