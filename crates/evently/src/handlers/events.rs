//! Event CRUD handlers.
//!
//! These handlers use the repository trait object for database access.
//! Request bodies are read as raw bytes so that an empty body can stand in
//! for `{}` and malformed JSON can be told apart from a failed validation.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use evently_core::event::{
    conflict_span, parse_date_window, parse_event_id, validate_create, validate_schedule,
    validate_update, Event, EventError,
};
use evently_core::serde::deserialize_optional_string;
use evently_core::storage::{DateRange, PageRequest, RepositoryError, DEFAULT_PAGE_SIZE};

use crate::{handlers::AppError, state::AppState};

/// Query parameters for listing events.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    /// Zero-based page number (default: 0)
    #[serde(default)]
    pub page_index: u32,
    /// Events per page (default: 30)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Window start, as a date or milliseconds since the epoch
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start_date: Option<String>,
    /// Window end, as a date or milliseconds since the epoch
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end_date: Option<String>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Response body for `GET /api/events`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    /// Total number of matching events, across all pages.
    pub count: u64,
    pub page_index: u32,
    pub page_size: u32,
    pub data: Vec<Event>,
}

/// Parses a JSON request body. An empty body reads as `{}`.
fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse JSON body: {e}")))
}

fn not_found(id: Uuid) -> AppError {
    AppError::from(RepositoryError::NotFound {
        entity_type: "Event",
        id: id.to_string(),
    })
}

/// Rejects a span that intersects a stored event.
async fn ensure_no_conflict(state: &AppState, span: Option<DateRange>) -> Result<(), AppError> {
    let Some(span) = conflict_span(span) else {
        return Ok(());
    };
    if state.event_repo.count_in_range(span).await? > 0 {
        return Err(EventError::Overlap.into());
    }
    Ok(())
}

// ============================================================================
// List Events
// ============================================================================

/// List events (GET /api/events).
pub async fn list_events(
    State(state): State<AppState>,
    query_result: Result<Query<ListEventsQuery>, QueryRejection>,
) -> Result<Json<ListEventsResponse>, AppError> {
    let Query(query) = query_result
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {e}")))?;

    let window = parse_date_window(query.start_date.as_deref(), query.end_date.as_deref())?;
    let page = PageRequest::new(query.page_index, query.page_size);

    let result = state.event_repo.list_events(page, window).await?;

    Ok(Json(ListEventsResponse {
        count: result.count,
        page_index: query.page_index,
        page_size: query.page_size,
        data: result.events,
    }))
}

// ============================================================================
// Create Event
// ============================================================================

/// Create a new event (POST /api/events).
pub async fn create_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Event>, AppError> {
    let payload = parse_body(&body)?;
    let new_event = validate_create(&payload)?;
    new_event.ensure_schedule()?;

    let span = validate_schedule(new_event.start_date, new_event.end_date, new_event.repeats)?;
    ensure_no_conflict(&state, span).await?;

    let event = state.event_repo.create_event(&new_event).await?;

    tracing::info!(event_id = %event.id, title = %event.title, "Created new event");
    tracing::debug!(event = ?event, "Stored event");

    Ok(Json(event))
}

// ============================================================================
// Get Event
// ============================================================================

/// Get a single event by ID (GET /api/events/{id}).
pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = parse_event_id(&raw_id)?;

    let event = state
        .event_repo
        .get_event(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(event))
}

// ============================================================================
// Update Event
// ============================================================================

/// Partially update an event (PUT /api/events/{id}).
///
/// The merged dates must still form a valid interval. Overlap with other
/// events is not re-checked.
pub async fn update_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let id = parse_event_id(&raw_id)?;
    let payload = parse_body(&body)?;
    let patch = validate_update(&payload)?;

    let existing = state
        .event_repo
        .get_event(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let merged = existing.merged(&patch);
    validate_schedule(merged.start_date, merged.end_date, merged.repeats)?;

    if !patch.is_empty() {
        state.event_repo.update_event(id, &patch).await?;
        tracing::info!(event_id = %id, "Updated event");
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Delete Event
// ============================================================================

/// Delete an event (DELETE /api/events/{id}).
pub async fn delete_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_event_id(&raw_id)?;

    let event = state
        .event_repo
        .get_event(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.event_repo.delete_event(id).await?;

    tracing::info!(event_id = %id, title = %event.title, "Deleted event");
    tracing::debug!(event = ?event, "Removed event");

    Ok(StatusCode::NO_CONTENT)
}
