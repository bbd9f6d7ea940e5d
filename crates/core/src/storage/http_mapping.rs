//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - everything else -> 500 (Internal Server Error)
///
/// Pool acquisition timeouts surface as `ConnectionFailed` and map to 500.
///
/// # Examples
///
/// ```
/// use evently_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Event",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            entity_type: "Event",
            id: "6f5a6af4-6af8-4296-acd9-b428419aa0ae".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Event",
            id: "6f5a6af4-6af8-4296-acd9-b428419aa0ae".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_storage_faults_map_to_500() {
        let errors = [
            RepositoryError::ConnectionFailed("pool timed out".to_string()),
            RepositoryError::QueryFailed("database is locked".to_string()),
            RepositoryError::Serialization("unknown repeats value".to_string()),
            RepositoryError::InvalidData("bad uuid".to_string()),
        ];
        for error in &errors {
            assert_eq!(repository_error_to_status_code(error), 500, "{error}");
        }
    }
}
