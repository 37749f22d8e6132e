use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::{Book, Order, User, ValidationError};
use crate::query::{FieldMap, TableDescriptor};

use super::error::Result;
use super::types::{ListRequest, ListResponse, LookupKey};

/// A record kind the generic repository can persist.
///
/// The descriptor fixes the table layout; `insert_fields` and `patch_fields`
/// validate caller input and turn it into named statement arguments.
pub trait Entity: Clone + Send + Sync + Unpin + 'static {
    type Create: Send + Sync;
    type Patch: Send + Sync;

    fn descriptor() -> &'static TableDescriptor;

    /// Every writable column for a new row.
    fn insert_fields(input: &Self::Create) -> std::result::Result<FieldMap, ValidationError>;

    /// Only the columns the patch sets. May be empty.
    fn patch_fields(patch: &Self::Patch) -> std::result::Result<FieldMap, ValidationError>;
}

/// Repository for CRUD operations over one entity kind.
///
/// Implementations must be thread-safe (`Send + Sync`) for use from
/// concurrent async tasks.
#[async_trait]
pub trait CrudRepository<E: Entity>: Send + Sync {
    /// Inserts a new row and returns its generated id.
    async fn create(&self, input: &E::Create) -> Result<Uuid>;

    /// Fetches one row by primary or alternate key.
    ///
    /// Returns `NotFound` when no row matches.
    async fn get_by_pkey(&self, key: &LookupKey) -> Result<E>;

    /// Returns one page ordered by id, plus the total row count.
    async fn get_list(&self, request: ListRequest) -> Result<ListResponse<E>>;

    /// Applies a partial update and returns the number of rows changed.
    ///
    /// Zero means no row had that id; it is not an error at this layer.
    async fn update(&self, id: Uuid, patch: &E::Patch) -> Result<u64>;

    /// Deletes a row. Returns `NotFound` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Single entry point to every repository, sharing one connection pool.
#[async_trait]
pub trait Storage: Send + Sync {
    fn books(&self) -> &dyn CrudRepository<Book>;

    fn orders(&self) -> &dyn CrudRepository<Order>;

    fn users(&self) -> &dyn CrudRepository<User>;

    /// Releases every pooled connection. Later calls fail with `ConnectionFailed`.
    async fn close(&self);
}
