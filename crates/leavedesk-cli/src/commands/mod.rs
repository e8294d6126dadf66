//! CLI command definitions and dispatch.

pub mod admin;
pub mod leave;
pub mod migrate;
pub mod serve;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use leavedesk_api::AppState;
use leavedesk_core::config::{AppConfig, CONFIG_DIR_ENV, ENV_NAME_ENV};
use leavedesk_core::error::AppError;
use leavedesk_core::traits::SystemClock;
use leavedesk_database::Stores;

use crate::output::OutputFormat;

/// LeaveDesk: leave requests and support tickets
#[derive(Debug, Parser)]
#[command(name = "leavedesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and {env}.toml
    #[arg(short, long, env = CONFIG_DIR_ENV, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply
    #[arg(short, long, env = ENV_NAME_ENV, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the LeaveDesk server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account bootstrap
    Admin(admin::AdminArgs),
    /// User inspection
    User(user::UserArgs),
    /// Leave request maintenance
    Leave(leave::LeaveArgs),
}

impl Cli {
    /// Whether the server is being started.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve(_))
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Admin(args) => admin::execute(args, config).await,
            Commands::User(args) => user::execute(args, config, self.format).await,
            Commands::Leave(args) => leave::execute(args, config).await,
        }
    }
}

/// Helper: connect the configured stores and build the services over them.
pub async fn connect_services(config: AppConfig) -> Result<AppState, AppError> {
    let stores = Stores::connect(&config).await?;
    Ok(leavedesk_api::build_state(
        config,
        Arc::new(SystemClock),
        stores,
    ))
}

/// Helper: read a value from the terminal when it was not supplied.
pub fn prompt_password(prompt: &str, confirm: bool) -> Result<String, AppError> {
    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }
    input
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
