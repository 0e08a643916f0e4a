//! Error types for the server binary.
//!
//! [`AppError`] is the top-level error that `main` propagates with `?`.

use analytics_api::ServerError;
use analytics_db::DbError;

/// Errors that can occur during server startup or while serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Connecting to the database or initializing the schema failed.
    #[error("database error: {0}")]
    Database(#[from] DbError),

    /// The HTTP server failed to bind or serve.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}
