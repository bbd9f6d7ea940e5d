//! In-memory storage backend.
//!
//! Keeps every event in a `HashMap` behind `Arc<RwLock<_>>`. Used by the
//! router tests and by builds without the `sqlite` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use evently::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
