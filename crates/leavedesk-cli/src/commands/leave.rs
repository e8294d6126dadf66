//! Leave request maintenance commands.

use clap::{Args, Subcommand};

use leavedesk_core::config::AppConfig;
use leavedesk_core::error::AppError;

use crate::output;

/// Arguments for leave commands
#[derive(Debug, Args)]
pub struct LeaveArgs {
    /// Leave subcommand
    #[command(subcommand)]
    pub command: LeaveCommand,
}

/// Leave subcommands
#[derive(Debug, Subcommand)]
pub enum LeaveCommand {
    /// Expire every stale pending request now
    Sweep,
}

/// Execute leave commands
pub async fn execute(args: &LeaveArgs, config: AppConfig) -> Result<(), AppError> {
    let state = super::connect_services(config).await?;

    let result = match &args.command {
        LeaveCommand::Sweep => state.leave.expire_stale(None).await.map(|expired| {
            output::print_success(&format!("Expired {expired} pending leave request(s)"));
            output::print_kv(
                "Threshold (hours)",
                &state.leave.expiry().num_hours().to_string(),
            );
        }),
    };

    state.stores.close().await;
    result
}
