//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `bookstore_core::storage`.
//! Constraint failures are mapped to semantic variants (e.g., UNIQUE
//! constraint to AlreadyExists).

use bookstore_core::entity::ValidationError;
use bookstore_core::storage::RepositoryError;
use sqlx::error::ErrorKind;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / PRIMARY KEY constraint → `RepositoryError::AlreadyExists`
/// - FOREIGN KEY constraint → `RepositoryError::InvalidReference`
/// - NOT NULL / CHECK constraint → `RepositoryError::Validation`
/// - Pool and I/O errors → `RepositoryError::ConnectionFailed`
/// - Row decode errors → `RepositoryError::InvalidData`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    map_sqlx_error_with_key(err, entity_type, "unknown")
}

/// Maps a sqlx error with a known key to a RepositoryError.
///
/// Use this variant when the id or alternate key is known at the call site.
pub fn map_sqlx_error_with_key(
    err: sqlx::Error,
    entity_type: &'static str,
    key: impl Into<String>,
) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::AlreadyExists {
                entity_type,
                key: key.into(),
            },
            ErrorKind::ForeignKeyViolation => RepositoryError::InvalidReference {
                entity_type,
                detail: db_err.message().to_string(),
            },
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                ValidationError::Rejected(db_err.message().to_string()).into()
            }
            _ => RepositoryError::QueryFailed(db_err.message().to_string()),
        },

        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            key: key.into(),
        },

        sqlx::Error::PoolTimedOut => {
            RepositoryError::ConnectionFailed("Timed out waiting for a connection".to_string())
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::ConnectionFailed("Connection pool is closed".to_string())
        }
        err @ (sqlx::Error::Io(_)
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Configuration(_)) => RepositoryError::ConnectionFailed(err.to_string()),

        err @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)) => RepositoryError::InvalidData(err.to_string()),

        err => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let result = map_sqlx_error(sqlx::Error::RowNotFound, "Book");

        assert!(matches!(
            result,
            RepositoryError::NotFound {
                entity_type: "Book",
                ..
            }
        ));
    }

    #[test]
    fn test_error_with_key_preserves_key() {
        let result = map_sqlx_error_with_key(sqlx::Error::RowNotFound, "User", "abc-123");

        match result {
            RepositoryError::NotFound { entity_type, key } => {
                assert_eq!(entity_type, "User");
                assert_eq!(key, "abc-123");
            }
            other => panic!("Expected NotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_pool_errors_map_to_connection_failed() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed, "Order"),
            RepositoryError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut, "Order"),
            RepositoryError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Io(std::io::Error::other("reset")), "Order"),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_decode_errors_map_to_invalid_data() {
        let err = sqlx::Error::ColumnDecode {
            index: "book_id".to_string(),
            source: Box::new(std::io::Error::other("not a uuid")),
        };

        assert!(matches!(
            map_sqlx_error(err, "Book"),
            RepositoryError::InvalidData(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::ColumnNotFound("price".to_string()), "Book"),
            RepositoryError::InvalidData(_)
        ));
    }

    #[test]
    fn test_other_errors_map_to_query_failed() {
        let result = map_sqlx_error(sqlx::Error::Protocol("bad frame".to_string()), "User");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
