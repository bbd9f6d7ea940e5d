use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Event;

use super::DateRangeError;

pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// A closed time window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a new range, validating that start <= end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Returns true if `instant` lies within the window, bounds included.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of events plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPage {
    pub count: u64,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, h, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_range_construction() {
        let range = DateRange::new(ts(1), ts(5)).unwrap();

        assert_eq!(range.start, ts(1));
        assert_eq!(range.end, ts(5));
    }

    #[test]
    fn test_zero_length_range_is_valid() {
        assert!(DateRange::new(ts(3), ts(3)).is_ok());
    }

    #[test]
    fn test_invalid_range_returns_error() {
        assert_eq!(
            DateRange::new(ts(5), ts(1)),
            Err(DateRangeError::InvalidRange)
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(ts(1), ts(5)).unwrap();

        assert!(range.contains(&ts(1)));
        assert!(range.contains(&ts(5)));
        assert!(!range.contains(&ts(6)));
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(PageRequest::default().offset(), 0);
        assert_eq!(PageRequest::default().limit(), 30);
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }
}
