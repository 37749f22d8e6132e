use thiserror::Error;

use crate::entity::ValidationError;
use crate::query::RewriteError;

/// Errors that can occur during repository operations.
///
/// Backends classify every driver failure into one of these variants before
/// it leaves the storage layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{entity_type} not found: {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },
    #[error("{entity_type} references a missing or still-referenced row: {detail}")]
    InvalidReference {
        entity_type: &'static str,
        detail: String,
    },
    #[error("{entity_type} already exists: {key}")]
    AlreadyExists {
        entity_type: &'static str,
        key: String,
    },
    #[error("{entity_type} {id} was created but could not be read back: {reason}")]
    CreatedButUnconfirmed {
        entity_type: &'static str,
        id: String,
        reason: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<RewriteError> for RepositoryError {
    fn from(err: RewriteError) -> Self {
        RepositoryError::QueryFailed(err.to_string())
    }
}

impl RepositoryError {
    /// Builds a `NotFound` for the given entity and key.
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }

    /// Whether the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RepositoryError::Validation(_)
                | RepositoryError::NotFound { .. }
                | RepositoryError::InvalidReference { .. }
                | RepositoryError::AlreadyExists { .. }
        )
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
