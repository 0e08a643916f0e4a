//! Shared type definitions for the Analytics REST API.
//!
//! This crate is the single source of truth for the event entity and the
//! HTTP payloads built around it. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for API clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for event identifiers
//! - [`event`] -- The event record, create/update payloads, and list envelope

pub mod event;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use event::{Event, EventCreate, EventList, EventUpdate};
pub use ids::EventId;

