//! Storage facade over the SQLite repositories.

use std::sync::OnceLock;

use async_trait::async_trait;

use bookstore_core::entity::{Book, Order, User};
use bookstore_core::storage::{CrudRepository, Result, Storage};

use crate::config::StoreConfig;

use super::pool::ConnectionPool;
use super::repository::SqliteRepository;

/// Owns the connection pool and hands out one repository per entity kind.
///
/// Repositories are built on first access and cached for the store's lifetime.
pub struct SqliteStore {
    pool: ConnectionPool,
    books: OnceLock<SqliteRepository<Book>>,
    orders: OnceLock<SqliteRepository<Order>>,
    users: OnceLock<SqliteRepository<User>>,
}

impl SqliteStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool,
            books: OnceLock::new(),
            orders: OnceLock::new(),
            users: OnceLock::new(),
        }
    }

    /// Connects to the configured database and bootstraps the schema.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let pool = ConnectionPool::connect(config).await?;
        pool.init_schema().await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn book_repository(&self) -> &SqliteRepository<Book> {
        self.books.get_or_init(|| {
            tracing::debug!("Book repository initialised");
            SqliteRepository::new(self.pool.inner().clone())
        })
    }

    pub fn order_repository(&self) -> &SqliteRepository<Order> {
        self.orders.get_or_init(|| {
            tracing::debug!("Order repository initialised");
            SqliteRepository::new(self.pool.inner().clone())
        })
    }

    pub fn user_repository(&self) -> &SqliteRepository<User> {
        self.users.get_or_init(|| {
            tracing::debug!("User repository initialised");
            SqliteRepository::new(self.pool.inner().clone())
        })
    }
}

#[async_trait]
impl Storage for SqliteStore {
    fn books(&self) -> &dyn CrudRepository<Book> {
        self.book_repository()
    }

    fn orders(&self) -> &dyn CrudRepository<Order> {
        self.order_repository()
    }

    fn users(&self) -> &dyn CrudRepository<User> {
        self.user_repository()
    }

    async fn close(&self) {
        self.pool.shutdown().await;
    }
}
