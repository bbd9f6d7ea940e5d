//! SQLite schema definitions and SQL query constants.
//!
//! Timestamps are stored as RFC 3339 text with millisecond precision and a
//! `Z` suffix, so lexical comparison matches chronological order.

/// SQL statement to create the events table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL CHECK (length(title) <= 512),
    description TEXT CHECK (description IS NULL OR length(description) <= 2048),
    status TEXT NOT NULL DEFAULT 'busy' CHECK (status IN ('busy', 'free')),
    repeats TEXT NOT NULL DEFAULT 'never' CHECK (
        repeats IN ('never', 'daily', 'weekly', 'monthly', 'annually', 'every weekday', 'every weekend')
    ),
    start_date TEXT,
    end_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(start_date);
"#;

pub const INSERT_EVENT: &str = r#"
INSERT INTO events (id, title, description, status, repeats, start_date, end_date, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, title, description, status, repeats, start_date, end_date, created_at, updated_at
FROM events
WHERE id = ?1
"#;

// Dated events sort by start with dateless ones last, then by creation order.

pub const SELECT_EVENTS_PAGE: &str = r#"
SELECT id, title, description, status, repeats, start_date, end_date, created_at, updated_at
FROM events
ORDER BY start_date IS NULL, start_date ASC, created_at ASC, id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const COUNT_EVENTS: &str = r#"
SELECT COUNT(*)
FROM events
"#;

// Listing window: ?1 and ?2 are the inclusive bounds.

pub const SELECT_EVENTS_IN_WINDOW_PAGE: &str = r#"
SELECT id, title, description, status, repeats, start_date, end_date, created_at, updated_at
FROM events
WHERE (start_date BETWEEN ?1 AND ?2 AND end_date BETWEEN ?1 AND ?2)
   OR (repeats <> 'never' AND start_date BETWEEN ?1 AND ?2)
   OR (repeats <> 'never' AND start_date IS NULL AND end_date IS NULL)
ORDER BY start_date IS NULL, start_date ASC, created_at ASC, id ASC
LIMIT ?3 OFFSET ?4
"#;

pub const COUNT_EVENTS_IN_WINDOW: &str = r#"
SELECT COUNT(*)
FROM events
WHERE (start_date BETWEEN ?1 AND ?2 AND end_date BETWEEN ?1 AND ?2)
   OR (repeats <> 'never' AND start_date BETWEEN ?1 AND ?2)
   OR (repeats <> 'never' AND start_date IS NULL AND end_date IS NULL)
"#;

/// Events intersecting the candidate span `[?1, ?2]`, or nested with it
/// in either direction (inclusive bounds).
pub const COUNT_OVERLAPPING: &str = r#"
SELECT COUNT(*)
FROM events
WHERE start_date IS NOT NULL
  AND end_date IS NOT NULL
  AND start_date <= end_date
  AND (
      (start_date < ?2 AND ?1 < end_date)
      OR (start_date >= ?1 AND end_date <= ?2)
      OR (?1 >= start_date AND ?2 <= end_date)
  )
"#;

pub const UPDATE_EVENT: &str = r#"
UPDATE events
SET title = COALESCE(?2, title),
    description = COALESCE(?3, description),
    status = COALESCE(?4, status),
    repeats = COALESCE(?5, repeats),
    start_date = COALESCE(?6, start_date),
    end_date = COALESCE(?7, end_date),
    updated_at = ?8
WHERE id = ?1
RETURNING id, title, description, status, repeats, start_date, end_date, created_at, updated_at
"#;

pub const DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE id = ?1
"#;

pub const PING: &str = "SELECT 1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS events"));
        assert!(CREATE_TABLES.contains("idx_events_start_date"));
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_EVENT.contains("INSERT"));
        assert!(SELECT_EVENT_BY_ID.contains("WHERE id = ?1"));
        assert!(SELECT_EVENTS_PAGE.contains("LIMIT ?1 OFFSET ?2"));
        assert!(COUNT_EVENTS.contains("COUNT(*)"));
        assert!(SELECT_EVENTS_IN_WINDOW_PAGE.contains("LIMIT ?3 OFFSET ?4"));
        assert!(COUNT_EVENTS_IN_WINDOW.contains("BETWEEN ?1 AND ?2"));
        assert!(COUNT_OVERLAPPING.contains("start_date < ?2"));
        assert!(UPDATE_EVENT.contains("RETURNING"));
        assert!(DELETE_EVENT.contains("DELETE"));
    }

    #[test]
    fn test_listings_share_ordering() {
        let order = "ORDER BY start_date IS NULL, start_date ASC, created_at ASC, id ASC";
        assert!(SELECT_EVENTS_PAGE.contains(order));
        assert!(SELECT_EVENTS_IN_WINDOW_PAGE.contains(order));
    }
}
