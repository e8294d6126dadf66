//! Admin account bootstrap commands.

use clap::{Args, Subcommand};

use leavedesk_core::config::AppConfig;
use leavedesk_core::error::AppError;
use leavedesk_service::admin::SeedOutcome;

use crate::output;

/// Default seeded admin email.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@company.com";
/// Default seeded admin password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";
/// Display name of the seeded admin.
pub const SEED_ADMIN_NAME: &str = "System Admin";

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create the system admin unless one already holds the email
    Seed {
        /// Admin email
        #[arg(short, long, env = "ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL)]
        email: String,
        /// Admin password
        #[arg(short, long, env = "ADMIN_PASSWORD", default_value = DEFAULT_ADMIN_PASSWORD, hide_env_values = true)]
        password: String,
        /// Display name
        #[arg(short, long, default_value = SEED_ADMIN_NAME)]
        name: String,
    },
    /// Reset an existing admin's password
    ResetPassword {
        /// Admin email
        #[arg(short, long, env = "ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL)]
        email: String,
        /// New password (will prompt if not provided)
        #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: AppConfig) -> Result<(), AppError> {
    let state = super::connect_services(config).await?;

    let result = match &args.command {
        AdminCommand::Seed {
            email,
            password,
            name,
        } => match state.users.seed_admin(name, email, password).await {
            Ok(SeedOutcome::Created(admin)) => {
                output::print_success(&format!("Admin created -> {}", admin.email));
                output::print_kv("ID", &admin.id.to_string());
                Ok(())
            }
            Ok(SeedOutcome::AlreadyExists(admin)) => {
                output::print_warning(&format!("Admin already exists -> {}", admin.email));
                Ok(())
            }
            Err(e) => Err(e),
        },
        AdminCommand::ResetPassword { email, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => super::prompt_password("New admin password", true)?,
            };
            state
                .users
                .reset_admin_password(email, &password)
                .await
                .map(|()| output::print_success(&format!("Admin password reset -> {email}")))
        }
    };

    state.stores.close().await;
    result
}
