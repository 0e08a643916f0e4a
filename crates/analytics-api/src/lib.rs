//! REST API server for event records.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Event CRUD endpoints** under `/api/events` backed by an injected
//!   [`EventRepository`](analytics_db::EventRepository)
//! - **Health check** (`GET /health-check`) reporting store reachability
//! - **Sample endpoints** (`GET /`, `GET /items/:item_id`)
//!
//! # Architecture
//!
//! Handlers never reach a global database handle: the store lives in
//! [`AppState`] and is passed in through Axum's `State` extractor. Input
//! is validated by the extractors ([`ValidatedJson`](extract::ValidatedJson)
//! and path parsing) before the store is invoked, and every error becomes
//! a `{"detail": ...}` JSON body via [`ApiError`](error::ApiError).

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
