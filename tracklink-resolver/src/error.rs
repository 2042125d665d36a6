//! Error types for tracklink-resolver
//!
//! Only `ResolveError` ever reaches a caller of the resolver. `UpstreamError`
//! stays inside the metadata sources and is turned into an empty outcome.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Caller-visible resolution error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Input does not match a recognized YouTube URL shape
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),
}

/// Upstream source failure (recovered locally, never surfaced)
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("API credential not configured")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No items returned")]
    NoItems,
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resolution error
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Resolve(ref err @ ResolveError::InvalidUrl(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_URL", err.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
