//! Date-interval predicates used by the create and update checks.
//!
//! All calendar arithmetic is done in UTC.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::storage::DateRange;

use super::error::EventError;
use super::types::Repeats;

/// Returns true iff both bounds are present and `start <= end`.
pub fn is_valid_interval(start: Option<&DateTime<Utc>>, end: Option<&DateTime<Utc>>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= end,
        _ => false,
    }
}

/// Returns true iff both instants share year, month and day of month.
pub fn is_same_day(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Returns true iff the span sits on one day with both bounds at 00:00.
///
/// Seconds are not inspected.
pub fn is_all_day_event(start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    is_same_day(start, end)
        && start.hour() == 0
        && start.minute() == 0
        && end.hour() == 0
        && end.minute() == 0
}

/// Returns true iff the spans intersect or one lies within the other.
///
/// Containment is inclusive, so a zero-length span conflicts with any span
/// it touches, including another zero-length span at the same instant. Two
/// spans of positive length that only share an endpoint do not conflict.
pub fn overlaps(a: &DateRange, b: &DateRange) -> bool {
    (a.start < b.end && b.start < a.end) || contains(a, b) || contains(b, a)
}

fn contains(outer: &DateRange, inner: &DateRange) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// Checks the dates an event would be stored with and returns its span.
///
/// A recurring event may omit both dates, in which case there is no span.
/// Anything else needs `start <= end`.
pub fn validate_schedule(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    repeats: Repeats,
) -> Result<Option<DateRange>, EventError> {
    if start.is_none() && end.is_none() && repeats.is_recurring() {
        return Ok(None);
    }
    match (start, end) {
        (Some(start), Some(end)) if is_valid_interval(Some(&start), Some(&end)) => {
            Ok(Some(DateRange { start, end }))
        }
        _ => Err(EventError::InvalidInterval),
    }
}

/// Returns the span that has to be free of other events, if any.
///
/// All-day events never conflict.
pub fn conflict_span(span: Option<DateRange>) -> Option<DateRange> {
    span.filter(|range| !is_all_day_event(&range.start, &range.end))
}
