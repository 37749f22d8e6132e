//! Storage backends.

pub mod sqlite;

pub use sqlite::{ConnectionPool, PoolStats, SqliteRepository, SqliteStore};
