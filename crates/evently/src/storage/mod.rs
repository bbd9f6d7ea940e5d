//! Storage backend implementations.
//!
//! Concrete implementations of [`evently_core::storage::EventRepository`].
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage through a bounded `sqlx` pool
//!
//! The in-memory backend is always compiled. It backs the server when the
//! `sqlite` feature is disabled, and the router tests.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p evently
//! ```
//!
//! Build with in-memory storage only:
//! ```bash
//! cargo build -p evently --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
