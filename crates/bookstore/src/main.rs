use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore::cli::{self, Cli};
use bookstore::output::format_error;
use bookstore::storage::SqliteStore;
use bookstore_core::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.store_config();
    let store = SqliteStore::open(&config)
        .await
        .with_context(|| format!("failed to open store at {}", config.database_url))?;

    let outcome = cli::run(&store, cli.command, cli.format).await;
    store.close().await;

    match outcome {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            if err.is_client_error() {
                tracing::warn!(error = %err, "Command rejected");
            } else {
                tracing::error!(error = %err, "Command failed");
            }
            eprintln!("{}", format_error(&err, cli.format));
            std::process::exit(1);
        }
    }
}
