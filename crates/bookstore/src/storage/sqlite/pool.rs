//! Connection pool lifecycle.

use std::str::FromStr;
use std::time::Duration;

use bookstore_core::storage::{RepositoryError, Result};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::StoreConfig;

use super::error::map_sqlx_error;
use super::schema;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Polling interval while shutdown waits for checked-out connections.
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Open connections, idle or checked out.
    pub size: u32,
    pub idle: usize,
}

/// Bounded pool of SQLite connections shared by every repository.
///
/// Each statement checks out one connection and returns it as soon as the
/// statement completes or its future is dropped.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    pool: SqlitePool,
}

impl ConnectionPool {
    /// Opens a pool for `config.database_url`, creating the file if needed.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        tracing::info!(
            url = %config.database_url,
            max_connections = config.max_connections,
            "Connection pool opened"
        );

        Ok(Self { pool })
    }

    /// Creates missing tables and indexes.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Schema"))?;

        tracing::debug!("Schema ready");
        Ok(())
    }

    pub fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Stops handing out connections and returns once every connection,
    /// including ones still checked out by in-flight statements, is closed.
    ///
    /// Acquiring afterwards fails, which repositories report as
    /// `ConnectionFailed`.
    pub async fn shutdown(&self) {
        self.pool.close().await;
        while self.pool.size() > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
        tracing::info!("Connection pool closed");
    }
}
