//! SQLite storage backend implementation.
//!
//! Built on `sqlx` with a bounded connection pool. One generic repository is
//! instantiated per entity kind and exposed through [`SqliteStore`].

mod conversions;
mod error;
mod pool;
mod repository;
mod schema;
mod store;

pub use conversions::SqliteEntity;
pub use pool::{ConnectionPool, PoolStats};
pub use repository::SqliteRepository;
pub use store::SqliteStore;
