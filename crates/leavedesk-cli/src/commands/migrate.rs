//! Database migration management commands.

use clap::{Args, Subcommand};

use leavedesk_core::config::AppConfig;
use leavedesk_core::error::AppError;
use leavedesk_database::DatabasePool;
use leavedesk_database::migration::{migration_status, run_migrations};

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut database = config.database.clone();
    database.run_migrations = false;
    let db = DatabasePool::connect(&database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(db.pool()).await.map(|()| {
                output::print_success("All migrations applied successfully.");
            })
        }
        MigrateCommand::Status => migration_status(db.pool()).await.map(|states| {
            println!("Migration status:");
            for state in &states {
                let mark = if state.applied { "applied" } else { "pending" };
                println!("  {:>4}  {:<32} {}", state.version, state.description, mark);
            }
            if states.iter().all(|s| s.applied) {
                output::print_success("Database is up to date.");
            }
        }),
    };

    db.close().await;
    result
}
