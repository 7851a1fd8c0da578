//! Mapping of failures onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::debug;

use playtrace_core::ManagerError;

use super::models::ErrorBody;

/// Errors returned by API handlers.
///
/// Every variant renders as `{ "error": <message> }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing required field or unreadable body.
    #[error("{0}")]
    BadRequest(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// No route for this path and method.
    #[error("Route not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(msg) => ApiError::BadRequest(msg),
            // Storage only fails when an entity is missing.
            ManagerError::Storage(e) => ApiError::NotFound(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        debug!(%status, error = %self, "request rejected");
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
