//! Functional core for evently.
//!
//! Pure types and functions shared by the server. Nothing in this crate
//! performs I/O.

pub mod event;
pub mod serde;
pub mod storage;
