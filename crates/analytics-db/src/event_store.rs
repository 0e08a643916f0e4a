//! Event store operations over the `events` table.
//!
//! [`EventRepository`] is the seam between the HTTP layer and persistence.
//! Two implementations exist: [`PgEventStore`] (this module) and
//! [`MemoryEventStore`](crate::MemoryEventStore) for tests and database-free
//! runs.
//!
//! A missing record is a normal outcome, not a failure: lookups return
//! `Ok(None)` and deletes return `Ok(false)`. Only persistence faults
//! surface as [`DbError`].

use analytics_types::{Event, EventCreate, EventId, EventList, EventUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// CRUD operations over event records.
///
/// Implementations own the records exclusively; callers only ever see
/// copies. Each method performs at most one store operation, so there is
/// no partial-failure state to unwind.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event and return it with its assigned id and
    /// timestamps.
    async fn create(&self, payload: &EventCreate) -> Result<Event, DbError>;

    /// Return every stored event in insertion order.
    async fn list(&self) -> Result<EventList, DbError>;

    /// Look up a single event.
    async fn get(&self, id: EventId) -> Result<Option<Event>, DbError>;

    /// Apply `update` to an existing event, refreshing `updated_at`.
    ///
    /// Returns `Ok(None)` when no event has `id`.
    async fn update(&self, id: EventId, update: &EventUpdate) -> Result<Option<Event>, DbError>;

    /// Permanently remove an event.
    ///
    /// Returns `Ok(false)` when no event has `id`.
    async fn delete(&self, id: EventId) -> Result<bool, DbError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}

/// `PostgreSQL`-backed [`EventRepository`].
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Create a new event store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventStore {
    async fn create(&self, payload: &EventCreate) -> Result<Event, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"INSERT INTO events (name, description)
              VALUES ($1, $2)
              RETURNING id, name, description, created_at, updated_at",
        )
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, "Inserted event");
        Ok(row.into())
    }

    async fn list(&self) -> Result<EventList, DbError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"SELECT id, name, description, created_at, updated_at
              FROM events
              ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(EventList::new(rows.into_iter().map(Event::from).collect()))
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"SELECT id, name, description, created_at, updated_at
              FROM events
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Event::from))
    }

    async fn update(&self, id: EventId, update: &EventUpdate) -> Result<Option<Event>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"UPDATE events
              SET description = $2, updated_at = now()
              WHERE id = $1
              RETURNING id, name, description, created_at, updated_at",
        )
        .bind(id.into_inner())
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            tracing::debug!(%id, "Updated event");
        }
        Ok(row.map(Event::from))
    }

    async fn delete(&self, id: EventId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(%id, "Deleted event");
        }
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// A row from the `events` table.
///
/// Uses runtime types rather than compile-time checked types to
/// avoid requiring a live database during builds.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Database-generated event ID.
    pub id: Uuid,
    /// Event name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::from(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
