//! SQLite repository implementation.
//!
//! Implements [`EventRepository`] on top of a bounded `sqlx` connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use evently_core::event::{Event, EventPatch, NewEvent};
use evently_core::serde::{format_timestamp, truncate_to_millis};
use evently_core::storage::{
    DateRange, EventPage, EventRepository, PageRequest, RepositoryError, Result,
};

use super::conversions::{format_optional_datetime, row_to_event, EventRow};
use super::error::{map_sqlx_error, map_sqlx_error_with_id};
use super::schema;
use crate::config::Config;

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens a pool against `config.database_url` and creates the schema.
    ///
    /// The database file is created if it doesn't exist.
    pub async fn new(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_pool_max)
            .min_connections(config.db_pool_min)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::from_pool(pool).await
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// The pool holds a single connection that never expires, since every
    /// connection to `sqlite::memory:` is a separate database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Event"))?;
        Ok(())
    }
}

/// SQLite integers are signed; page bounds beyond `i64::MAX` saturate.
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// ============================================================================
// EventRepository implementation
// ============================================================================

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        let event = event.clone().into_event(truncate_to_millis(Utc::now()));
        let id = event.id.to_string();

        sqlx::query(schema::INSERT_EVENT)
            .bind(&id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.status.as_str())
            .bind(event.repeats.as_str())
            .bind(format_optional_datetime(event.start_date.as_ref()))
            .bind(format_optional_datetime(event.end_date.as_ref()))
            .bind(format_timestamp(&event.created_at))
            .bind(format_timestamp(&event.updated_at))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Event", &id))?;

        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(schema::SELECT_EVENT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Event", id.to_string()))?;

        row.map(row_to_event).transpose()
    }

    async fn list_events(&self, page: PageRequest, window: Option<DateRange>) -> Result<EventPage> {
        let limit = to_sql_int(page.limit());
        let offset = to_sql_int(page.offset());

        let (count, rows) = match window {
            Some(window) => {
                let start = format_timestamp(&window.start);
                let end = format_timestamp(&window.end);

                let count = sqlx::query_scalar::<_, i64>(schema::COUNT_EVENTS_IN_WINDOW)
                    .bind(&start)
                    .bind(&end)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| map_sqlx_error(e, "Event"))?;

                let rows = sqlx::query_as::<_, EventRow>(schema::SELECT_EVENTS_IN_WINDOW_PAGE)
                    .bind(&start)
                    .bind(&end)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| map_sqlx_error(e, "Event"))?;

                (count, rows)
            }
            None => {
                let count = sqlx::query_scalar::<_, i64>(schema::COUNT_EVENTS)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| map_sqlx_error(e, "Event"))?;

                let rows = sqlx::query_as::<_, EventRow>(schema::SELECT_EVENTS_PAGE)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| map_sqlx_error(e, "Event"))?;

                (count, rows)
            }
        };

        let events = rows
            .into_iter()
            .map(row_to_event)
            .collect::<Result<Vec<_>>>()?;

        Ok(EventPage {
            count: u64::try_from(count).unwrap_or_default(),
            events,
        })
    }

    async fn count_in_range(&self, range: DateRange) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(schema::COUNT_OVERLAPPING)
            .bind(format_timestamp(&range.start))
            .bind(format_timestamp(&range.end))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Event"))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn update_event(&self, id: Uuid, patch: &EventPatch) -> Result<Event> {
        let id_str = id.to_string();

        let row = sqlx::query_as::<_, EventRow>(schema::UPDATE_EVENT)
            .bind(&id_str)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.repeats.map(|r| r.as_str()))
            .bind(format_optional_datetime(patch.start_date.as_ref()))
            .bind(format_optional_datetime(patch.end_date.as_ref()))
            .bind(format_timestamp(&truncate_to_millis(Utc::now())))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Event", &id_str))?;

        match row {
            Some(row) => row_to_event(row),
            None => Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: id_str,
            }),
        }
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        let result = sqlx::query(schema::DELETE_EVENT)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Event", &id_str))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: id_str,
            });
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Event"))?;
        Ok(())
    }
}
