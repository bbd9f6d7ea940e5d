//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `evently_core::storage`.
//! Specific errors are mapped to semantic variants (e.g., UNIQUE constraint to AlreadyExists).

use evently_core::storage::RepositoryError;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / PRIMARY KEY violations → `RepositoryError::AlreadyExists`
/// - Pool timeouts and I/O failures → `RepositoryError::ConnectionFailed`
/// - Decode failures → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    map_sqlx_error_with_id(err, entity_type, "unknown")
}

/// Maps a sqlx error with a known ID to a RepositoryError.
///
/// Use this variant when the entity ID is known at the call site.
pub fn map_sqlx_error_with_id(
    err: sqlx::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.into(),
            }
        }

        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },

        sqlx::Error::PoolTimedOut => {
            RepositoryError::ConnectionFailed("Timed out acquiring a connection".to_string())
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::ConnectionFailed("Connection pool is closed".to_string())
        }
        sqlx::Error::Io(e) => RepositoryError::ConnectionFailed(e.to_string()),

        e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) => {
            RepositoryError::Serialization(e.to_string())
        }

        e => RepositoryError::QueryFailed(e.to_string()),
    }
}
