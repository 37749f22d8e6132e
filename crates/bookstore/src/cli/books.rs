//! Book CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use bookstore_core::entity::{CreateBook, UpdateBook};
use bookstore_core::storage::{ListRequest, Result, Storage};

use super::OutputFormat;
use crate::output::format_output;
use crate::service::EntityService;

/// Book management commands.
#[derive(Debug, Parser)]
pub struct BooksCommand {
    #[command(subcommand)]
    pub action: BooksAction,
}

/// Available book actions.
#[derive(Debug, Subcommand)]
pub enum BooksAction {
    /// Add a book.
    Create {
        /// Title.
        #[arg(long)]
        name: String,
        /// Author.
        #[arg(long)]
        author_name: String,
        /// Price, non-negative.
        #[arg(long)]
        price: f64,
        /// Publication date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
    },
    /// Get a book by ID.
    Get {
        /// Book ID.
        id: Uuid,
    },
    /// List books, one page at a time.
    List {
        /// Page size. Zero or less uses the default.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
        /// Rows to skip.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Update the given fields of a book.
    Update {
        /// Book ID.
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        author_name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a book by ID.
    Delete {
        /// Book ID.
        id: Uuid,
    },
}

impl BooksCommand {
    pub async fn execute(self, store: &dyn Storage, format: OutputFormat) -> Result<String> {
        let service = EntityService::new(store.books());

        match self.action {
            BooksAction::Create {
                name,
                author_name,
                price,
                date,
            } => {
                let book = service
                    .create(&CreateBook {
                        name,
                        author_name,
                        price,
                        date,
                    })
                    .await?;
                format_output(&book, format)
            }
            BooksAction::Get { id } => {
                let book = service.get(&id.into()).await?;
                format_output(&book, format)
            }
            BooksAction::List { limit, offset } => {
                let page = service.list(ListRequest::new(limit, offset)).await?;
                format_output(&page, format)
            }
            BooksAction::Update {
                id,
                name,
                author_name,
                price,
                date,
            } => {
                let patch = UpdateBook {
                    name,
                    author_name,
                    price,
                    date,
                };
                let book = service.update(id, &patch).await?;
                format_output(&book, format)
            }
            BooksAction::Delete { id } => {
                service.delete(id).await?;
                format_output(&json!({ "deleted": id }), format)
            }
        }
    }
}
