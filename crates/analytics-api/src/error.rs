//! Error types for the REST API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"detail": "<message>"}`.

use analytics_db::DbError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Detail message returned for any lookup on a missing event.
pub const EVENT_NOT_FOUND: &str = "Event not found";

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested event does not exist.
    #[error("Event not found")]
    NotFound,

    /// A path parameter or request body failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request body could not be read as JSON at all.
    #[error("{detail}")]
    Rejected {
        /// Status chosen by the JSON extractor (400, 413, 415, ...).
        status: StatusCode,
        /// Human-readable reason.
        detail: String,
    },

    /// The store failed. Details are logged, never returned.
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self::Validation(e.body_text()),
            other => Self::Rejected {
                status: other.status(),
                detail: other.body_text(),
            },
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(describe_validation(&errors))
    }
}

/// Flatten field errors into `field: message` pairs joined by `; `.
///
/// Rejected values are never echoed back.
fn describe_validation(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let reason = err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string);
                format!("{field}: {reason}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, EVENT_NOT_FOUND.to_owned()),
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Rejected { status, detail } => (status, detail),
            Self::Database(e) => {
                tracing::error!(error = %e, "Event store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("internal server error"),
                )
            }
        };

        let body = serde_json::json!({ "detail": detail });

        (status, axum::Json(body)).into_response()
    }
}
