//! Leave lifecycle configuration.

use serde::{Deserialize, Serialize};

const MAX_EXPIRY_HOURS: u64 = 24 * 365 * 10;

/// Settings for the pending-request expiry rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveConfig {
    /// Age in hours after which an unreviewed request becomes `expired`.
    #[serde(default = "default_pending_expiry")]
    pub pending_expiry_hours: u64,
    /// Period of the background expiry sweep in seconds (0 = disabled,
    /// expiry then happens only lazily on reads and writes).
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl LeaveConfig {
    /// The expiry threshold as a `chrono::Duration`, capped at ten years.
    pub fn pending_expiry(&self) -> chrono::Duration {
        let hours = self.pending_expiry_hours.min(MAX_EXPIRY_HOURS) as i64;
        chrono::Duration::hours(hours)
    }
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            pending_expiry_hours: default_pending_expiry(),
            sweep_interval_seconds: 0,
        }
    }
}

fn default_pending_expiry() -> u64 {
    48
}
