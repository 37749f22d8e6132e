//! User CLI commands.

use clap::{ArgGroup, Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use bookstore_core::entity::{CreateUser, UpdateUser, ValidationError};
use bookstore_core::storage::{ListRequest, LookupKey, Result, Storage};

use super::OutputFormat;
use crate::output::format_output;
use crate::service::EntityService;

/// User management commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// Register a user.
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Unique login.
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone_number: String,
    },
    /// Get a user by ID or login. The ID wins when both are given.
    #[command(group(ArgGroup::new("key").required(true).multiple(true).args(["id", "login"])))]
    Get {
        /// User ID.
        #[arg(long)]
        id: Option<Uuid>,
        /// User login.
        #[arg(long)]
        login: Option<String>,
    },
    /// List users, one page at a time.
    List {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Update the given fields of a user.
    Update {
        /// User ID.
        id: Uuid,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        login: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
    },
    /// Delete a user by ID.
    Delete {
        /// User ID.
        id: Uuid,
    },
}

impl UsersCommand {
    pub async fn execute(self, store: &dyn Storage, format: OutputFormat) -> Result<String> {
        let service = EntityService::new(store.users());

        match self.action {
            UsersAction::Create {
                first_name,
                last_name,
                login,
                password,
                phone_number,
            } => {
                let user = service
                    .create(&CreateUser {
                        first_name,
                        last_name,
                        login,
                        password,
                        phone_number,
                    })
                    .await?;
                format_output(&user, format)
            }
            UsersAction::Get { id, login } => {
                let key = LookupKey::from_parts(id, login)
                    .ok_or(ValidationError::EmptyField { field: "login" })?;
                let user = service.get(&key).await?;
                format_output(&user, format)
            }
            UsersAction::List { limit, offset } => {
                let page = service.list(ListRequest::new(limit, offset)).await?;
                format_output(&page, format)
            }
            UsersAction::Update {
                id,
                first_name,
                last_name,
                login,
                password,
                phone_number,
            } => {
                let patch = UpdateUser {
                    first_name,
                    last_name,
                    login,
                    password,
                    phone_number,
                };
                let user = service.update(id, &patch).await?;
                format_output(&user, format)
            }
            UsersAction::Delete { id } => {
                service.delete(id).await?;
                format_output(&json!({ "deleted": id }), format)
            }
        }
    }
}
