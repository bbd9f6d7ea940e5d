//! Parsing of the `startDate` / `endDate` list filters.

use chrono::{DateTime, Utc};

use crate::serde::{parse_timestamp, timestamp_from_millis};
use crate::storage::DateRange;

use super::error::DateQueryError;

/// A date query parameter, tagged by how the client spelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParam {
    /// A digits-only value, read as milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// Anything else, read as a calendar date or date-time.
    CalendarDate(DateTime<Utc>),
}

impl DateParam {
    /// Parses a raw query value. `param` names the parameter in errors.
    pub fn parse(param: &'static str, raw: &str) -> Result<Self, DateQueryError> {
        let raw = raw.trim();
        let invalid = || DateQueryError::InvalidDate {
            param,
            value: raw.to_string(),
        };

        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            let millis: i64 = raw.parse().map_err(|_| invalid())?;
            timestamp_from_millis(millis).ok_or_else(invalid)?;
            return Ok(DateParam::EpochMillis(millis));
        }

        parse_timestamp(raw)
            .map(DateParam::CalendarDate)
            .ok_or_else(invalid)
    }

    /// The instant this parameter denotes.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            DateParam::EpochMillis(millis) => {
                timestamp_from_millis(*millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
            }
            DateParam::CalendarDate(ts) => *ts,
        }
    }
}

/// Builds the listing window from the optional raw parameters.
///
/// Both or neither must be supplied; `None` means "no date filter".
pub fn parse_date_window(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<DateRange>, DateQueryError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = DateParam::parse("startDate", start)?.instant();
            let end = DateParam::parse("endDate", end)?.instant();
            DateRange::new(start, end)
                .map(Some)
                .map_err(|_| DateQueryError::InvalidRange)
        }
        _ => Err(DateQueryError::PartialRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_digits_are_epoch_millis() {
        assert_eq!(
            DateParam::parse("startDate", "1608469694868").unwrap(),
            DateParam::EpochMillis(1_608_469_694_868)
        );
    }

    #[test]
    fn test_calendar_date_string() {
        let param = DateParam::parse("startDate", "2020-12-12").unwrap();
        assert_eq!(
            param,
            DateParam::CalendarDate(Utc.with_ymd_and_hms(2020, 12, 12, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_negative_millis_are_not_digits_only() {
        // "-5" is not digits-only, so it is read as a calendar string and fails
        assert!(DateParam::parse("endDate", "-5").is_err());
    }

    #[test]
    fn test_overflowing_millis_is_invalid() {
        let err = DateParam::parse("endDate", "99999999999999999999999").unwrap_err();
        assert!(matches!(
            err,
            DateQueryError::InvalidDate {
                param: "endDate",
                ..
            }
        ));
    }

    #[test]
    fn test_five_digit_year_is_invalid() {
        let err = DateParam::parse("endDate", "253402300800000").unwrap_err();
        assert!(matches!(
            err,
            DateQueryError::InvalidDate {
                param: "endDate",
                ..
            }
        ));
    }

    #[test]
    fn test_instant_is_uniform() {
        let millis = DateParam::parse("startDate", "1608422400000").unwrap();
        let calendar = DateParam::parse("startDate", "2020-12-20").unwrap();
        assert_eq!(millis.instant(), calendar.instant());
    }

    #[test]
    fn test_window_requires_both_bounds() {
        assert_eq!(
            parse_date_window(Some("2020-12-12"), None),
            Err(DateQueryError::PartialRange)
        );
        assert_eq!(
            parse_date_window(None, Some("2020-12-12")),
            Err(DateQueryError::PartialRange)
        );
        assert_eq!(parse_date_window(None, None), Ok(None));
    }

    #[test]
    fn test_window_mixed_formats() {
        let window = parse_date_window(Some("1608469694868"), Some("2020-12-28"))
            .unwrap()
            .unwrap();
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2020, 12, 28, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_window_same_day_is_allowed() {
        assert!(parse_date_window(Some("2020-12-12"), Some("2020-12-12"))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_window_reversed_bounds() {
        assert_eq!(
            parse_date_window(Some("2020-12-28"), Some("2020-12-01")),
            Err(DateQueryError::InvalidRange)
        );
    }
}
