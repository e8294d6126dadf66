//! LeaveDesk Server: leave requests and support tickets for small teams.
//!
//! Main entry point: loads configuration, installs logging and runs the
//! HTTP server until a shutdown signal arrives.

use leavedesk_api::telemetry::init_logging;
use leavedesk_core::config::{AppConfig, CONFIG_DIR_ENV, ENV_NAME_ENV};

#[tokio::main]
async fn main() {
    let config = match AppConfig::load_from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_dir = %std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| "config".into()),
        env = %std::env::var(ENV_NAME_ENV).unwrap_or_else(|_| "development".into()),
        "Starting LeaveDesk"
    );

    if let Err(e) = leavedesk_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
