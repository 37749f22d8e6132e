//! CLI command definitions.

pub mod books;
pub mod orders;
pub mod users;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use bookstore_core::storage::Result;

use crate::config::StoreConfig;
use crate::output::format_output;
use crate::storage::SqliteStore;

/// Manage books, orders and users in a SQLite store.
#[derive(Debug, Parser)]
#[command(name = "bookstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections. Overrides `DB_MAX_CONNECTIONS`.
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Seconds to wait for a free connection. Overrides `DB_ACQUIRE_TIMEOUT_SECS`.
    #[arg(long)]
    pub acquire_timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::from_env();
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(max_connections) = self.max_connections {
            config = config.with_max_connections(max_connections);
        }
        if let Some(secs) = self.acquire_timeout_secs {
            config = config.with_acquire_timeout_secs(secs);
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON.
    Json,
    /// Indented JSON.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the schema if missing and report pool status.
    Init,
    /// Book management.
    Books(books::BooksCommand),
    /// Order management.
    Orders(orders::OrdersCommand),
    /// User management.
    Users(users::UsersCommand),
}

/// Runs one command against an open store and returns the rendered output.
pub async fn run(store: &SqliteStore, command: Commands, format: OutputFormat) -> Result<String> {
    match command {
        Commands::Init => format_output(
            &json!({ "status": "ready", "pool": store.pool().stats() }),
            format,
        ),
        Commands::Books(cmd) => cmd.execute(store, format).await,
        Commands::Orders(cmd) => cmd.execute(store, format).await,
        Commands::Users(cmd) => cmd.execute(store, format).await,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use bookstore_core::storage::RepositoryError;

    use super::*;
    use crate::storage::sqlite::test_support::open_pool;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bookstore").chain(args.iter().copied())).unwrap()
    }

    async fn run_json(store: &SqliteStore, args: &[&str]) -> Result<Value> {
        let cli = parse(args);
        let output = run(store, cli.command, OutputFormat::Json).await?;
        Ok(serde_json::from_str(&output).unwrap())
    }

    #[test]
    fn test_flags_override_configuration() {
        let cli = parse(&[
            "--database-url",
            "sqlite://cli.db",
            "--max-connections",
            "3",
            "books",
            "list",
        ]);

        let config = cli.store_config();

        assert_eq!(config.database_url, "sqlite://cli.db");
        assert_eq!(config.max_connections, 3);
    }

    #[test]
    fn test_user_get_requires_a_key() {
        let result = Cli::try_parse_from(["bookstore", "users", "get"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_list_accepts_negative_window() {
        let cli = parse(&["orders", "list", "--limit", "-1", "--offset", "-5"]);

        assert!(matches!(
            cli.command,
            Commands::Orders(orders::OrdersCommand {
                action: orders::OrdersAction::List {
                    limit: -1,
                    offset: -5
                }
            })
        ));
    }

    #[tokio::test]
    async fn test_init_reports_ready() {
        let (pool, _dir) = open_pool(2).await;
        let store = SqliteStore::new(pool);

        let output = run_json(&store, &["init"]).await.unwrap();

        assert_eq!(output["status"], "ready");
        assert!(output["pool"]["size"].as_u64().unwrap() <= 2);
    }

    #[tokio::test]
    async fn test_book_order_user_flow() {
        let (pool, _dir) = open_pool(2).await;
        let store = SqliteStore::new(pool);

        let book = run_json(
            &store,
            &[
                "books",
                "create",
                "--name",
                "Dune",
                "--author-name",
                "Frank Herbert",
                "--price",
                "9.99",
                "--date",
                "1965-08-01",
            ],
        )
        .await
        .unwrap();
        let user = run_json(
            &store,
            &[
                "users",
                "create",
                "--first-name",
                "Ada",
                "--last-name",
                "Lovelace",
                "--login",
                "ada",
                "--password",
                "analytical",
                "--phone-number",
                "+15550100",
            ],
        )
        .await
        .unwrap();
        assert!(user.get("password").is_none());

        let book_id = book["book_id"].as_str().unwrap();
        let user_id = user["user_id"].as_str().unwrap();
        let order = run_json(
            &store,
            &["orders", "create", "--book-id", book_id, "--user-id", user_id],
        )
        .await
        .unwrap();
        assert_eq!(order["book_id"], book["book_id"]);

        let by_login = run_json(&store, &["users", "get", "--login", "ada"])
            .await
            .unwrap();
        assert_eq!(by_login["user_id"], user["user_id"]);

        let page = run_json(&store, &["orders", "list"]).await.unwrap();
        assert_eq!(page["total_count"], 1);

        let err = run_json(&store, &["books", "delete", book_id])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_book_is_not_found() {
        let (pool, _dir) = open_pool(2).await;
        let store = SqliteStore::new(pool);

        let result = run_json(
            &store,
            &[
                "books",
                "update",
                "0191f0a4-7b1c-7cc0-8a55-3f1f2b6b0a01",
                "--price",
                "5",
            ],
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
