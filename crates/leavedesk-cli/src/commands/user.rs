//! User inspection commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use leavedesk_core::config::AppConfig;
use leavedesk_core::error::AppError;
use leavedesk_entity::identity::{Identity, Role};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List identities, newest first
    List {
        /// Only show one role (admin, manager, employee)
        #[arg(short, long)]
        role: Option<Role>,
    },
}

/// One table row per identity.
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: Uuid,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Role")]
    pub role: Role,
    #[tabled(rename = "Created")]
    pub created_at: DateTime<Utc>,
}

impl From<Identity> for UserRow {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
            created_at: identity.created_at,
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect_services(config).await?;

    let result = match &args.command {
        UserCommand::List { role } => {
            let identities = match role {
                Some(role) => state.users.list_by_role(*role).await,
                None => state.users.list_all().await,
            };
            identities.map(|identities| {
                let rows: Vec<UserRow> = identities.into_iter().map(UserRow::from).collect();
                output::print_list(&rows, format);
            })
        }
    };

    state.stores.close().await;
    result
}
