//! Request/response operations on top of a repository.
//!
//! Adds what callers of a storage service expect beyond raw CRUD: created and
//! updated entities are read back, and an update that matched no row is
//! reported as `NotFound`.

use uuid::Uuid;

use bookstore_core::storage::{
    CrudRepository, Entity, ListRequest, ListResponse, LookupKey, RepositoryError, Result,
};

/// Service operations for one entity kind.
pub struct EntityService<'a, E: Entity> {
    repository: &'a dyn CrudRepository<E>,
}

impl<'a, E: Entity> EntityService<'a, E> {
    pub fn new(repository: &'a dyn CrudRepository<E>) -> Self {
        Self { repository }
    }

    fn entity_type() -> &'static str {
        E::descriptor().entity_type
    }

    /// Inserts the entity and returns it as stored.
    ///
    /// The read-back is a separate statement. If it fails the row still
    /// exists, so the error carries the new id.
    pub async fn create(&self, input: &E::Create) -> Result<E> {
        let id = self.repository.create(input).await?;

        self.repository
            .get_by_pkey(&LookupKey::Primary(id))
            .await
            .map_err(|err| {
                tracing::warn!(
                    entity = Self::entity_type(),
                    %id,
                    error = %err,
                    "Created row could not be read back"
                );
                RepositoryError::CreatedButUnconfirmed {
                    entity_type: Self::entity_type(),
                    id: id.to_string(),
                    reason: err.to_string(),
                }
            })
    }

    pub async fn get(&self, key: &LookupKey) -> Result<E> {
        self.repository.get_by_pkey(key).await
    }

    pub async fn list(&self, request: ListRequest) -> Result<ListResponse<E>> {
        self.repository.get_list(request).await
    }

    /// Applies the patch and returns the updated entity.
    pub async fn update(&self, id: Uuid, patch: &E::Patch) -> Result<E> {
        let rows = self.repository.update(id, patch).await?;
        if rows == 0 {
            return Err(RepositoryError::not_found(Self::entity_type(), id));
        }
        self.repository.get_by_pkey(&LookupKey::Primary(id)).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repository.delete(id).await
    }
}
