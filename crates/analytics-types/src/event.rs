//! The event entity and its request/response payloads.
//!
//! [`Event`] is the persisted record. [`EventCreate`] and [`EventUpdate`]
//! are the inbound payloads for `POST` and `PUT`; both derive
//! [`Validate`] so the HTTP layer can reject malformed input before the
//! store is ever touched. [`EventList`] is the envelope returned by the
//! list endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::ids::EventId;

/// A persisted event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Store-assigned identifier. Immutable after creation.
    pub id: EventId,
    /// Short text label.
    pub name: String,
    /// Free-form description, if any.
    pub description: Option<String>,
    /// When the record was created (UTC).
    pub created_at: DateTime<Utc>,
    /// When the record was last modified (UTC).
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Build a fresh record from a create payload, stamping both
    /// timestamps with the current time.
    pub fn from_create(id: EventId, payload: &EventCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields carried by `update` and refresh `updated_at`.
    ///
    /// `id`, `name`, and `created_at` are never touched.
    pub fn apply(&mut self, update: &EventUpdate) {
        self.description = Some(update.description.clone());
        self.updated_at = Utc::now();
    }
}

/// Payload for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventCreate {
    /// Name of the new event. Required and non-empty; no upper bound.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    /// Optional initial description.
    #[serde(default)]
    #[ts(optional)]
    pub description: Option<String>,
}

impl EventCreate {
    /// Create a payload carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Payload for updating an existing event.
///
/// Only the description is mutable once an event exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventUpdate {
    /// Replacement description.
    pub description: String,
}

/// Response envelope for the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventList {
    /// All events currently stored.
    pub results: Vec<Event>,
    /// Number of entries in `results`.
    pub count: usize,
}

impl EventList {
    /// Wrap a result set, deriving `count` from its length.
    pub fn new(results: Vec<Event>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}
