//! Serde and parsing helpers for timestamps and query strings.
//!
//! Timestamps travel as RFC 3339 strings with millisecond precision
//! (`2020-12-21T05:00:00.000Z`). The fixed width keeps lexical order equal to
//! chronological order, which the SQLite backend relies on for range queries.
//! Only instants in years 0000 through 9999 are accepted, since anything else
//! formats with a sign or a fifth year digit.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// Formats a timestamp as RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drops sub-millisecond precision.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Returns the timestamp if its year has exactly four digits.
pub fn within_year_range(ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (MIN_YEAR..=MAX_YEAR).contains(&ts.year()).then_some(ts)
}

/// Converts milliseconds since the Unix epoch into a timestamp.
pub fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).and_then(within_year_range)
}

/// Parses a timestamp string.
///
/// Accepted formats, tried in order:
/// - RFC 3339 (`2020-12-21T05:00:00Z`, `2020-12-21T05:00:00+02:00`)
/// - naive date-time, read as UTC (`2020-12-21T05:00:00`, `2020-12-21 05:00:00.250`)
/// - calendar date, read as midnight UTC (`2020-12-21`)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_any_format(raw.trim()).and_then(within_year_range)
}

fn parse_any_format(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(truncate_to_millis(ts.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(truncate_to_millis(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serialize a timestamp with [`format_timestamp`].
pub fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

/// Serialize an optional timestamp with [`format_timestamp`], `None` as `null`.
pub fn serialize_optional_timestamp<S>(
    ts: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ts {
        Some(ts) => serializer.serialize_some(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional string, treating empty strings as None.
///
/// Used for query parameters, where `?startDate=` means "not supplied".
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
