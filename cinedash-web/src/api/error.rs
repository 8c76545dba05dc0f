//! API error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinedash_common::Error;
use serde_json::json;
use tracing::error;

/// Errors surfaced to HTTP clients
///
/// Empty results are not errors; they come back as dashboard view states.
#[derive(Debug)]
pub enum ApiError {
    /// Store unreachable
    StoreUnavailable(String),
    /// Query or schema failure
    DataError(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Connection(msg) => ApiError::StoreUnavailable(msg),
            other => ApiError::DataError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::StoreUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Movie store unavailable: {}", msg),
            ),
            ApiError::DataError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load movies: {}", msg),
            ),
        };
        error!("{}", message);

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
