//! REST API endpoint handlers.
//!
//! Event handlers validate their input, make exactly one call on the
//! [`EventRepository`](analytics_db::EventRepository) held in [`AppState`],
//! and map a missing record to [`ApiError::NotFound`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Greeting |
//! | `GET` | `/items/:item_id` | Sample item echo |
//! | `GET` | `/health-check` | Liveness plus store reachability |
//! | `GET` | `/api/events/` | List all events |
//! | `POST` | `/api/events/` | Create an event |
//! | `GET` | `/api/events/:id` | Get one event |
//! | `PUT` | `/api/events/:id` | Update an event's description |
//! | `DELETE` | `/api/events/:id` | Delete an event |

use std::sync::Arc;

use analytics_types::{Event, EventCreate, EventId, EventList, EventUpdate};
use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /items/:item_id` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct ItemQuery {
    /// Optional free-text query echoed back to the caller.
    pub q: Option<String>,
}

// ---------------------------------------------------------------------------
// GET / -- greeting
// ---------------------------------------------------------------------------

/// Return a static greeting.
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({ "Hello": "World" }))
}

// ---------------------------------------------------------------------------
// GET /items/:item_id -- sample endpoint
// ---------------------------------------------------------------------------

/// Echo an integer item id and optional query string.
pub async fn read_item(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(item_id) = path?;
    let Query(params) = query?;
    let item_id: i64 = item_id
        .parse()
        .map_err(|e| ApiError::Validation(format!("item_id {item_id:?}: {e}")))?;

    Ok(Json(serde_json::json!({
        "item_id": item_id,
        "q": params.q,
        "message": "This is a sample analytics REST API.",
    })))
}

// ---------------------------------------------------------------------------
// GET /health-check
// ---------------------------------------------------------------------------

/// Report that the process is up, and whether the event store answers.
///
/// Always 200: an unreachable store is reported in the body, not as a
/// failed probe.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match state.events.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check: event store unreachable");
            "unavailable"
        }
    };

    Json(serde_json::json!({
        "status": "ok",
        "message": "The application is running smoothly.",
        "database": database,
    }))
}

// ---------------------------------------------------------------------------
// /api/events
// ---------------------------------------------------------------------------

/// List all events with their total count.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EventList>, ApiError> {
    let list = state.events.list().await?;
    Ok(Json(list))
}

/// Create an event from a validated payload. Responds `201 Created`.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<EventCreate>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = state.events.create(&payload).await?;
    tracing::info!(id = %event.id, name = event.name, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// Fetch a single event.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Event>, ApiError> {
    let Path(id_str) = path?;
    let id = parse_event_id(&id_str)?;
    let event = state.events.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

/// Overwrite an event's description.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<EventUpdate>,
) -> Result<Json<Event>, ApiError> {
    let Path(id_str) = path?;
    let id = parse_event_id(&id_str)?;
    let event = state
        .events
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!(%id, "Event updated");
    Ok(Json(event))
}

/// Delete an event. Responds `204 No Content`.
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id_str) = path?;
    let id = parse_event_id(&id_str)?;
    if !state.events.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(%id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an [`EventId`] from a path segment, returning an [`ApiError`] on failure.
fn parse_event_id(s: &str) -> Result<EventId, ApiError> {
    s.parse::<EventId>()
        .map_err(|e| ApiError::Validation(format!("invalid event id {s:?}: {e}")))
}
