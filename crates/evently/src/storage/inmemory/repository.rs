//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use evently_core::event::{
    filter_events_in_window, overlaps, sort_events_by_start, Event, EventPatch, NewEvent,
};
use evently_core::serde::truncate_to_millis;
use evently_core::storage::{
    DateRange, EventPage, EventRepository, PageRequest, RepositoryError, Result,
};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        let event = event.clone().into_event(truncate_to_millis(Utc::now()));

        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Event",
                id: event.id.to_string(),
            });
        }
        events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn list_events(&self, page: PageRequest, window: Option<DateRange>) -> Result<EventPage> {
        let all: Vec<Event> = self.events.read().await.values().cloned().collect();

        let mut matching: Vec<Event> = match window {
            Some(window) => filter_events_in_window(&all, &window)
                .into_iter()
                .cloned()
                .collect(),
            None => all,
        };
        sort_events_by_start(&mut matching);

        let count = matching.len() as u64;
        let events = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();

        Ok(EventPage { count, events })
    }

    async fn count_in_range(&self, range: DateRange) -> Result<u64> {
        let events = self.events.read().await;
        let count = events
            .values()
            .filter_map(Event::range)
            .filter(|span| overlaps(span, &range))
            .count();
        Ok(count as u64)
    }

    async fn update_event(&self, id: Uuid, patch: &EventPatch) -> Result<Event> {
        let mut events = self.events.write().await;
        let event = events.get_mut(&id).ok_or_else(|| RepositoryError::NotFound {
            entity_type: "Event",
            id: id.to_string(),
        })?;

        event.apply(patch);
        event.updated_at = truncate_to_millis(Utc::now());
        Ok(event.clone())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let mut events = self.events.write().await;
        if events.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
