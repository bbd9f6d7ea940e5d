//! SQLite storage backend implementation.
//!
//! Implements the repository trait with `sqlx` over a bounded `SqlitePool`.
//! Pool sizing and timeouts come from [`crate::config::Config`].

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
