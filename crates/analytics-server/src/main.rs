//! Server entry point for the Analytics REST API.
//!
//! Wires the `PostgreSQL` event store into the HTTP API and serves it.
//!
//! # Startup Sequence
//!
//! 1. Load `.env` (if present) and configuration from the environment
//! 2. Initialize structured logging (tracing)
//! 3. Connect the `PostgreSQL` pool
//! 4. Run migrations (creates the `events` table if absent)
//! 5. Serve until a shutdown signal arrives, then close the pool

mod config;
mod error;

use std::sync::Arc;

use analytics_api::AppState;
use analytics_db::{PgEventStore, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::AppError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// reached or migrated, or the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside development.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env()?;

    init_logging(config.json_logs);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable environment file"),
    }

    info!("analytics-server starting");

    let server_config = config.server();
    info!(
        host = server_config.host,
        port = server_config.port,
        db_max_connections = config.db_max_connections,
        db_connect_timeout_secs = config.db_connect_timeout.as_secs(),
        "configuration loaded"
    );

    run(&config).await?;

    info!("analytics-server stopped");
    Ok(())
}

/// Connect the store, initialize the schema, and serve until shutdown.
///
/// The pool is closed whether or not the server exits cleanly.
async fn run(config: &AppConfig) -> Result<(), AppError> {
    let pool = PostgresPool::connect(&config.postgres()).await?;
    pool.run_migrations().await?;

    let store = PgEventStore::new(pool.pool().clone());
    let state = Arc::new(AppState::new(Arc::new(store)));

    let served = analytics_api::start_server(&config.server(), state).await;

    pool.close().await;
    served.map_err(AppError::from)
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
