//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use evently_core::event::{Event, EventStatus, Repeats};
use evently_core::serde::format_timestamp;
use evently_core::storage::RepositoryError;

/// Raw event row as selected by the queries in `schema`.
///
/// Columns: id, title, description, status, repeats, start_date, end_date,
/// created_at, updated_at
pub type EventRow = (
    String,
    String,
    Option<String>,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
);

/// Convert a SQLite row to an Event.
pub fn row_to_event(row: EventRow) -> Result<Event, RepositoryError> {
    let (id, title, description, status, repeats, start_date, end_date, created_at, updated_at) =
        row;

    Ok(Event {
        id: parse_uuid(&id)?,
        title,
        description,
        status: parse_status(&status)?,
        repeats: parse_repeats(&repeats)?,
        start_date: start_date.as_deref().map(parse_datetime).transpose()?,
        end_date: end_date.as_deref().map(parse_datetime).transpose()?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Format an optional timestamp column.
pub fn format_optional_datetime(ts: Option<&DateTime<Utc>>) -> Option<String> {
    ts.map(format_timestamp)
}

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s).map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID '{s}': {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid timestamp '{s}': {e}")))
}

fn parse_status(s: &str) -> Result<EventStatus, RepositoryError> {
    EventStatus::parse(s)
        .ok_or_else(|| RepositoryError::Serialization(format!("Unknown event status: {s}")))
}

fn parse_repeats(s: &str) -> Result<Repeats, RepositoryError> {
    Repeats::parse(s)
        .ok_or_else(|| RepositoryError::Serialization(format!("Unknown repeats value: {s}")))
}
