use async_trait::async_trait;
use uuid::Uuid;

use crate::event::{Event, EventPatch, NewEvent};

use super::{DateRange, EventPage, PageRequest, Result};

/// Repository for event operations.
///
/// Implementations own `created_at` / `updated_at`.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts a new event and returns the stored record.
    ///
    /// Fails with `AlreadyExists` when a client-supplied ID is taken.
    async fn create_event(&self, event: &NewEvent) -> Result<Event>;

    /// Gets an event by its ID.
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;

    /// Lists one page of events ordered by start date, optionally restricted
    /// to a listing window (see [`crate::event::matches_window`]).
    async fn list_events(&self, page: PageRequest, window: Option<DateRange>)
        -> Result<EventPage>;

    /// Counts dated events whose span overlaps `range`.
    async fn count_in_range(&self, range: DateRange) -> Result<u64>;

    /// Applies a partial update and returns the stored record.
    async fn update_event(&self, id: Uuid, patch: &EventPatch) -> Result<Event>;

    /// Deletes an event by its ID.
    async fn delete_event(&self, id: Uuid) -> Result<()>;

    /// Verifies that the backing store is reachable.
    async fn health_check(&self) -> Result<()>;
}
