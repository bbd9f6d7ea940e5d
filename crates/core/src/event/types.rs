use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::DateRange;

use super::error::ValidationError;

/// Whether an event blocks time on the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Busy,
    Free,
}

impl EventStatus {
    pub const ALL: [EventStatus; 2] = [EventStatus::Busy, EventStatus::Free];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Busy => "busy",
            EventStatus::Free => "free",
        }
    }

    /// Parses the wire representation. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence tag of an event.
///
/// Stored and returned as-is; occurrences are never expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repeats {
    #[default]
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "annually")]
    Annually,
    #[serde(rename = "every weekday")]
    EveryWeekday,
    #[serde(rename = "every weekend")]
    EveryWeekend,
}

impl Repeats {
    pub const ALL: [Repeats; 7] = [
        Repeats::Never,
        Repeats::Daily,
        Repeats::Weekly,
        Repeats::Monthly,
        Repeats::Annually,
        Repeats::EveryWeekday,
        Repeats::EveryWeekend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Repeats::Never => "never",
            Repeats::Daily => "daily",
            Repeats::Weekly => "weekly",
            Repeats::Monthly => "monthly",
            Repeats::Annually => "annually",
            Repeats::EveryWeekday => "every weekday",
            Repeats::EveryWeekend => "every weekend",
        }
    }

    /// Parses the wire representation. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|repeats| repeats.as_str() == value)
    }

    /// Returns true for every tag except `never`.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Repeats::Never)
    }
}

impl fmt::Display for Repeats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: EventStatus,
    pub repeats: Repeats,
    #[serde(serialize_with = "crate::serde::serialize_optional_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "crate::serde::serialize_optional_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "crate::serde::serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "crate::serde::serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Returns the event's time span when both dates are set.
    ///
    /// A stored span with `start > end` is reported as `None`.
    pub fn range(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }

    /// Overwrites the fields present in `patch`, keeping the rest.
    ///
    /// Timestamps are left alone; the repository refreshes `updated_at`.
    pub fn apply(&mut self, patch: &EventPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(repeats) = patch.repeats {
            self.repeats = repeats;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
    }

    /// Returns a copy with `patch` applied.
    pub fn merged(&self, patch: &EventPatch) -> Self {
        let mut merged = self.clone();
        merged.apply(patch);
        merged
    }
}

/// A validated create payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Client-supplied identifier; generated when absent.
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: EventStatus,
    pub repeats: Repeats,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl NewEvent {
    /// Creates a busy, non-recurring event with no dates.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            status: EventStatus::default(),
            repeats: Repeats::default(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_dates(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_repeats(mut self, repeats: Repeats) -> Self {
        self.repeats = repeats;
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Non-recurring events must carry both dates.
    pub fn ensure_schedule(&self) -> Result<(), ValidationError> {
        if self.repeats.is_recurring() {
            return Ok(());
        }
        if self.start_date.is_none() {
            return Err(ValidationError::Required("startDate"));
        }
        if self.end_date.is_none() {
            return Err(ValidationError::Required("endDate"));
        }
        Ok(())
    }

    /// Materializes the event, stamping both timestamps with `now`.
    pub fn into_event(self, now: DateTime<Utc>) -> Event {
        Event {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            title: self.title,
            description: self.description,
            status: self.status,
            repeats: self.repeats,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated partial update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<EventStatus>,
    pub repeats: Option<Repeats>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
