//! Status code mapping for repository errors.
//!
//! Pure functions with no transport dependency, usable by any service
//! boundary that reports HTTP-style status codes.

use super::error::RepositoryError;

/// Maps a `RepositoryError` to an HTTP status code.
///
/// | Error | Status |
/// |-------|--------|
/// | `Validation` | 400 Bad Request |
/// | `NotFound` | 404 Not Found |
/// | `AlreadyExists` | 409 Conflict |
/// | `InvalidReference` | 422 Unprocessable Entity |
/// | `ConnectionFailed` | 503 Service Unavailable |
/// | everything else | 500 Internal Server Error |
///
/// # Example
///
/// ```
/// use bookstore_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::not_found("Book", "123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::Validation(_) => 400,
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::InvalidReference { .. } => 422,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::CreatedButUnconfirmed { .. }
        | RepositoryError::QueryFailed(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ValidationError;

    #[test]
    fn test_validation_maps_to_400() {
        let error = RepositoryError::Validation(ValidationError::EmptyField { field: "name" });
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::not_found("User", "ada");
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "User",
            key: "ada".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_invalid_reference_maps_to_422() {
        let error = RepositoryError::InvalidReference {
            entity_type: "Order",
            detail: "FOREIGN KEY constraint failed".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 422);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("pool closed".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let unconfirmed = RepositoryError::CreatedButUnconfirmed {
            entity_type: "Book",
            id: "b-1".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&unconfirmed), 500);
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::QueryFailed("x".to_string())),
            500
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::InvalidData("x".to_string())),
            500
        );
    }
}
