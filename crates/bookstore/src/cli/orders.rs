//! Order CLI commands.

use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use bookstore_core::entity::{CreateOrder, UpdateOrder};
use bookstore_core::storage::{ListRequest, Result, Storage};

use super::OutputFormat;
use crate::output::format_output;
use crate::service::EntityService;

/// Order management commands.
#[derive(Debug, Parser)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub action: OrdersAction,
}

/// Available order actions.
#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// Place an order of a book for a user.
    Create {
        /// Ordered book.
        #[arg(long)]
        book_id: Uuid,
        /// Ordering user.
        #[arg(long)]
        user_id: Uuid,
    },
    /// Get an order by ID.
    Get {
        /// Order ID.
        id: Uuid,
    },
    /// List orders, one page at a time.
    List {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Point an order at a different book or user.
    Update {
        /// Order ID.
        id: Uuid,
        #[arg(long)]
        book_id: Option<Uuid>,
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Delete an order by ID.
    Delete {
        /// Order ID.
        id: Uuid,
    },
}

impl OrdersCommand {
    pub async fn execute(self, store: &dyn Storage, format: OutputFormat) -> Result<String> {
        let service = EntityService::new(store.orders());

        match self.action {
            OrdersAction::Create { book_id, user_id } => {
                let order = service.create(&CreateOrder { book_id, user_id }).await?;
                format_output(&order, format)
            }
            OrdersAction::Get { id } => {
                let order = service.get(&id.into()).await?;
                format_output(&order, format)
            }
            OrdersAction::List { limit, offset } => {
                let page = service.list(ListRequest::new(limit, offset)).await?;
                format_output(&page, format)
            }
            OrdersAction::Update {
                id,
                book_id,
                user_id,
            } => {
                let order = service
                    .update(id, &UpdateOrder { book_id, user_id })
                    .await?;
                format_output(&order, format)
            }
            OrdersAction::Delete { id } => {
                service.delete(id).await?;
                format_output(&json!({ "deleted": id }), format)
            }
        }
    }
}
