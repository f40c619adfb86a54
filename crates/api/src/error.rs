//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use sources::SourceError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// A named upstream dependency was unavailable.
    Source(SourceError),
    /// Resource not found; carries the fixed response message.
    NotFound(&'static str),
    /// A request field failed validation.
    Validation {
        field: &'static str,
        message: String,
    },
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Source(err) => {
                tracing::warn!(source = err.source_name(), error = %err, "external source unavailable");
                let body = serde_json::json!({
                    "error": "External data source unavailable",
                    "details": format!("Could not fetch data from {}", err.source_name()),
                });
                (StatusCode::SERVICE_UNAVAILABLE, axum::Json(body)).into_response()
            }
            ApiError::NotFound(message) => {
                let body = serde_json::json!({ "error": message });
                (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
            }
            ApiError::Validation { field, message } => {
                let mut details = serde_json::Map::new();
                details.insert(field.to_string(), serde_json::Value::String(message));
                let body = serde_json::json!({
                    "error": "Validation failed",
                    "details": details,
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal server error");
                let body = serde_json::json!({ "error": message });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Source(e) => ApiError::Source(e),
            DomainError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}
