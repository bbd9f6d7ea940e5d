//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage is reached through a repository trait object so
//! the backend can be chosen by feature flag.

use std::sync::Arc;

use evently_core::storage::EventRepository;

use crate::config::Config;
use crate::storage::InMemoryRepository;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Event repository.
    pub event_repo: Arc<dyn EventRepository>,
    /// Configuration the server was started with.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState with the given repository and configuration.
    pub fn build(event_repo: Arc<dyn EventRepository>, config: Config) -> Self {
        Self {
            event_repo,
            config: Arc::new(config),
        }
    }

    /// Creates AppState backed by a fresh in-memory repository.
    pub fn in_memory(config: Config) -> Self {
        Self::build(Arc::new(InMemoryRepository::new()), config)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(Config::default())
    }
}

// ============================================================================
// Factory functions for different backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config).await?);
            Ok(Self::build(sqlite_repo, config))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod inmemory {
    use super::*;

    impl AppState {
        /// Creates AppState with in-memory storage. Nothing is persisted.
        pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Built without the `sqlite` feature; events are kept in memory");
            Ok(Self::in_memory(config))
        }
    }
}
