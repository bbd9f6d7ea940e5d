//! Payload validation for the event endpoints.
//!
//! Both entry points take the raw JSON body and either return a typed payload
//! or the first constraint violation found. Fields are checked in declaration
//! order, then unknown keys are rejected.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::{fmt::Hyphenated, Uuid, Version};

use crate::serde::{parse_timestamp, timestamp_from_millis, truncate_to_millis};

use super::error::{IdError, ValidationError};
use super::types::{EventPatch, EventStatus, NewEvent, Repeats};

pub const TITLE_MAX_LEN: usize = 512;
pub const DESCRIPTION_MAX_LEN: usize = 2048;

const CREATE_FIELDS: [&str; 7] = [
    "id",
    "title",
    "startDate",
    "endDate",
    "status",
    "repeats",
    "description",
];

const UPDATE_FIELDS: [&str; 6] = [
    "title",
    "startDate",
    "endDate",
    "status",
    "repeats",
    "description",
];

/// Validates a create payload.
///
/// `title` is required; `id`, when present, must be a v4 UUID. Whether the
/// dates are required depends on `repeats`, see [`NewEvent::ensure_schedule`].
pub fn validate_create(body: &Value) -> Result<NewEvent, ValidationError> {
    let fields = as_object(body)?;

    let id = fields.get("id").map(|v| guid("id", v)).transpose()?;
    let title = match fields.get("title") {
        Some(value) => text("title", value, TITLE_MAX_LEN)?,
        None => return Err(ValidationError::Required("title")),
    };
    let start_date = optional_timestamp(fields, "startDate")?;
    let end_date = optional_timestamp(fields, "endDate")?;
    let status = optional_status(fields)?;
    let repeats = optional_repeats(fields)?;
    let description = optional_text(fields, "description", DESCRIPTION_MAX_LEN)?;

    reject_unknown(fields, &CREATE_FIELDS)?;

    Ok(NewEvent {
        id,
        title,
        description,
        status: status.unwrap_or_default(),
        repeats: repeats.unwrap_or_default(),
        start_date,
        end_date,
    })
}

/// Validates a partial update payload. Every field is optional; `id` is not
/// accepted.
pub fn validate_update(body: &Value) -> Result<EventPatch, ValidationError> {
    let fields = as_object(body)?;

    let patch = EventPatch {
        title: optional_text(fields, "title", TITLE_MAX_LEN)?,
        start_date: optional_timestamp(fields, "startDate")?,
        end_date: optional_timestamp(fields, "endDate")?,
        status: optional_status(fields)?,
        repeats: optional_repeats(fields)?,
        description: optional_text(fields, "description", DESCRIPTION_MAX_LEN)?,
    };

    reject_unknown(fields, &UPDATE_FIELDS)?;

    Ok(patch)
}

/// Parses a path identifier, accepting only v4 UUIDs in hyphenated form.
///
/// The simple, braced and URN spellings are rejected.
pub fn parse_event_id(raw: &str) -> Result<Uuid, IdError> {
    if raw.len() != Hyphenated::LENGTH {
        return Err(IdError);
    }
    Uuid::try_parse(raw)
        .ok()
        .filter(|id| id.get_version() == Some(Version::Random))
        .ok_or(IdError)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

fn reject_unknown(fields: &Map<String, Value>, allowed: &[&str]) -> Result<(), ValidationError> {
    match fields.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ValidationError::NotAllowed(key.clone())),
        None => Ok(()),
    }
}

fn text(field: &'static str, value: &Value, max: usize) -> Result<String, ValidationError> {
    let raw = value.as_str().ok_or(ValidationError::NotAString(field))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

fn optional_text(
    fields: &Map<String, Value>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    fields.get(field).map(|v| text(field, v, max)).transpose()
}

fn timestamp(field: &'static str, value: &Value) -> Result<DateTime<Utc>, ValidationError> {
    let parsed = match value {
        Value::String(raw) => parse_timestamp(raw),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(timestamp_from_millis),
        _ => None,
    };
    parsed
        .map(truncate_to_millis)
        .ok_or(ValidationError::InvalidDate(field))
}

fn optional_timestamp(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    fields.get(field).map(|v| timestamp(field, v)).transpose()
}

fn guid(field: &'static str, value: &Value) -> Result<Uuid, ValidationError> {
    let raw = value.as_str().ok_or(ValidationError::NotAString(field))?;
    parse_event_id(raw).map_err(|_| ValidationError::InvalidGuid(field))
}

fn choice<T>(
    field: &'static str,
    value: &Value,
    parse: fn(&str) -> Option<T>,
    allowed: &[&'static str],
) -> Result<T, ValidationError> {
    let raw = value.as_str().ok_or(ValidationError::NotAString(field))?;
    parse(raw).ok_or_else(|| ValidationError::NotOneOf {
        field,
        allowed: allowed.join(", "),
    })
}

fn optional_status(fields: &Map<String, Value>) -> Result<Option<EventStatus>, ValidationError> {
    let allowed = EventStatus::ALL.map(|s| s.as_str());
    fields
        .get("status")
        .map(|v| choice("status", v, EventStatus::parse, &allowed))
        .transpose()
}

fn optional_repeats(fields: &Map<String, Value>) -> Result<Option<Repeats>, ValidationError> {
    let allowed = Repeats::ALL.map(|r| r.as_str());
    fields
        .get("repeats")
        .map(|v| choice("repeats", v, Repeats::parse, &allowed))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_create_minimal() {
        let event = validate_create(&json!({ "title": "  Finish writing API  " })).unwrap();

        assert_eq!(event.title, "Finish writing API");
        assert_eq!(event.status, EventStatus::Busy);
        assert_eq!(event.repeats, Repeats::Never);
        assert_eq!(event.id, None);
        assert_eq!(event.start_date, None);
    }

    #[test]
    fn test_create_full() {
        let id = Uuid::new_v4();
        let event = validate_create(&json!({
            "id": id.to_string(),
            "title": "Get some Whataburger",
            "startDate": "2021-01-01T02:30:00",
            "endDate": 1609468200000_i64,
            "status": "free",
            "repeats": "every weekend",
            "description": " late night ",
        }))
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2021, 1, 1, 2, 30, 0).unwrap();
        assert_eq!(event.id, Some(id));
        assert_eq!(event.start_date, Some(expected));
        assert_eq!(event.end_date, Some(expected));
        assert_eq!(event.status, EventStatus::Free);
        assert_eq!(event.repeats, Repeats::EveryWeekend);
        assert_eq!(event.description.as_deref(), Some("late night"));
    }

    #[test]
    fn test_create_requires_title() {
        assert_eq!(
            validate_create(&json!({})),
            Err(ValidationError::Required("title"))
        );
    }

    #[test]
    fn test_create_rejects_non_object() {
        assert_eq!(
            validate_create(&json!(["title"])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn test_title_constraints() {
        assert_eq!(
            validate_create(&json!({ "title": "   " })),
            Err(ValidationError::Empty("title"))
        );
        assert_eq!(
            validate_create(&json!({ "title": 42 })),
            Err(ValidationError::NotAString("title"))
        );
        assert_eq!(
            validate_create(&json!({ "title": null })),
            Err(ValidationError::NotAString("title"))
        );
        assert_eq!(
            validate_create(&json!({ "title": "x".repeat(513) })),
            Err(ValidationError::TooLong {
                field: "title",
                max: TITLE_MAX_LEN
            })
        );
        assert!(validate_create(&json!({ "title": "x".repeat(512) })).is_ok());
    }

    #[test]
    fn test_description_too_long() {
        let err = validate_create(&json!({
            "title": "ok",
            "description": "d".repeat(2049),
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "\"description\" length must be less than or equal to 2048 characters long");
    }

    #[test]
    fn test_enum_membership() {
        let err = validate_create(&json!({ "title": "ok", "status": "maybe" })).unwrap_err();
        assert_eq!(err.to_string(), "\"status\" must be one of [busy, free]");

        let err = validate_create(&json!({ "title": "ok", "repeats": "hourly" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"repeats\" must be one of [never, daily, weekly, monthly, annually, every weekday, every weekend]"
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(
            validate_create(&json!({ "title": "ok", "startDate": "tomorrow" })),
            Err(ValidationError::InvalidDate("startDate"))
        );
        assert_eq!(
            validate_create(&json!({ "title": "ok", "endDate": true })),
            Err(ValidationError::InvalidDate("endDate"))
        );
    }

    #[test]
    fn test_dates_past_year_9999_are_invalid() {
        let err = validate_create(&json!({
            "title": "ok",
            "startDate": 253402300800000_i64,
            "endDate": 253402300800000_i64,
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidDate("startDate"));
        assert_eq!(err.to_string(), "\"startDate\" must be a valid date");

        assert_eq!(
            validate_update(&json!({ "endDate": "+10000-01-01T00:00:00" })),
            Err(ValidationError::InvalidDate("endDate"))
        );
    }

    #[test]
    fn test_create_id_must_be_v4() {
        assert_eq!(
            validate_create(&json!({ "title": "ok", "id": "hello-there" })),
            Err(ValidationError::InvalidGuid("id"))
        );
        assert_eq!(
            validate_create(&json!({ "title": "ok", "id": "00000000-0000-0000-0000-000000000000" })),
            Err(ValidationError::InvalidGuid("id"))
        );
        assert_eq!(
            validate_create(&json!({ "title": "ok", "id": "urn:uuid:6f5a6af4-6af8-4296-acd9-b428419aa0ae" })),
            Err(ValidationError::InvalidGuid("id"))
        );
    }

    #[test]
    fn test_first_error_wins_in_field_order() {
        let err = validate_create(&json!({ "status": "maybe", "unknown": 1 })).unwrap_err();
        assert_eq!(err, ValidationError::Required("title"));

        let err = validate_create(&json!({ "title": "ok", "unknown": 1, "status": "maybe" }))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotOneOf {
                field: "status",
                allowed: "busy, free".to_string()
            }
        );
    }

    #[test]
    fn test_create_rejects_unknown_keys() {
        assert_eq!(
            validate_create(&json!({ "title": "ok", "location": "home" })),
            Err(ValidationError::NotAllowed("location".to_string()))
        );
    }

    #[test]
    fn test_update_accepts_empty_body() {
        assert_eq!(validate_update(&json!({})), Ok(EventPatch::default()));
    }

    #[test]
    fn test_update_rejects_id() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(
            validate_update(&json!({ "id": id })),
            Err(ValidationError::NotAllowed("id".to_string()))
        );
    }

    #[test]
    fn test_update_partial_fields() {
        let patch =
            validate_update(&json!({ "title": " Renamed ", "status": "free" })).unwrap();

        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.status, Some(EventStatus::Free));
        assert_eq!(patch.repeats, None);
        assert_eq!(patch.start_date, None);
    }

    #[test]
    fn test_parse_event_id() {
        assert!(parse_event_id("6f5a6af4-6af8-4296-acd9-b428419aa0ae").is_ok());
        assert_eq!(parse_event_id("hello-there"), Err(IdError));
        assert_eq!(parse_event_id("1"), Err(IdError));
        // v1 UUID
        assert_eq!(
            parse_event_id("c232ab00-9414-11ec-b3c8-9f6bdeced846"),
            Err(IdError)
        );
    }

    #[test]
    fn test_parse_event_id_requires_hyphenated_form() {
        for raw in [
            "6f5a6af46af84296acd9b428419aa0ae",
            "{6f5a6af4-6af8-4296-acd9-b428419aa0ae}",
            "urn:uuid:6f5a6af4-6af8-4296-acd9-b428419aa0ae",
        ] {
            assert_eq!(parse_event_id(raw), Err(IdError), "{raw}");
        }
        assert!(parse_event_id("6F5A6AF4-6AF8-4296-ACD9-B428419AA0AE").is_ok());
    }
}
