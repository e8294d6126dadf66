//! Start the LeaveDesk server.

use clap::Args;

use leavedesk_api::telemetry::init_logging;
use leavedesk_core::config::{AppConfig, StoreProvider};
use leavedesk_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store regardless of configuration
    #[arg(long)]
    pub memory: bool,

    /// Run database migrations on startup
    #[arg(long)]
    pub auto_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.store.provider = StoreProvider::Memory;
    }
    if args.auto_migrate {
        config.database.run_migrations = true;
    }

    init_logging(&config.logging);

    println!("Starting LeaveDesk server...");
    println!("  Host:  {}", config.server.host);
    println!("  Port:  {}", config.server.port);
    println!("  Store: {:?}", config.store.provider);

    leavedesk_api::run_server(config).await
}
