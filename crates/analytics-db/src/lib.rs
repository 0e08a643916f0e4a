//! Data layer for the Analytics REST API.
//!
//! `PostgreSQL` holds every event record. This crate owns the schema
//! (embedded migrations), the connection pool, and the CRUD operations
//! the HTTP layer calls through [`EventRepository`].
//!
//! # Architecture
//!
//! ```text
//! HTTP handler
//!     |
//!     +-- Arc<dyn EventRepository>
//!         |-- PgEventStore      (PostgreSQL via PostgresPool)
//!         +-- MemoryEventStore  (in-process, tests / no database)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool, configuration, migrations
//! - [`event_store`] -- The repository trait and its `PostgreSQL` implementation
//! - [`memory`] -- In-memory repository implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod event_store;
pub mod memory;
pub mod postgres;

// Re-export primary types for convenience.
pub use error::DbError;
pub use event_store::{EventRepository, EventRow, PgEventStore};
pub use memory::MemoryEventStore;
pub use postgres::{PostgresConfig, PostgresPool};
