//! Shared application state for the API server.
//!
//! [`AppState`] carries the event store the handlers operate on. The
//! store is injected at construction, so tests can hand in a
//! [`MemoryEventStore`](analytics_db::MemoryEventStore) while the server
//! binary hands in a [`PgEventStore`](analytics_db::PgEventStore).

use std::sync::Arc;

use analytics_db::EventRepository;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The event store backing `/api/events`.
    pub events: Arc<dyn EventRepository>,
}

impl AppState {
    /// Create application state around an event store.
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
