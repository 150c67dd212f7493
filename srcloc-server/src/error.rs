//! API error types with IntoResponse
//!
//! Every failure becomes `{ "error": <message> }` with a fixed, client-safe
//! message. Internal causes are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use srcloc_core::{BudgetLimit, LocateError, ValidationError};

pub const INVALID_NAME: &str = "Invalid component name";
pub const NOT_FOUND: &str = "Component not found";
pub const READ_FAILED: &str = "Failed to read source";
pub const SEARCH_ABORTED: &str = "Search aborted";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed component name (400)
    InvalidName(ValidationError),

    /// Walk completed without a definition (404)
    NotFound { name: String },

    /// Traversal budget exhausted (503)
    Aborted { limit: BudgetLimit },

    /// I/O or config failure during the walk (500, logged)
    Internal(LocateError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidName(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Aborted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => INVALID_NAME,
            Self::NotFound { .. } => NOT_FOUND,
            Self::Aborted { .. } => SEARCH_ABORTED,
            Self::Internal(_) => READ_FAILED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidName(e) => tracing::debug!("Rejected component name: {}", e),
            Self::NotFound { name } => tracing::debug!("Component '{}' not found", name),
            Self::Aborted { limit } => tracing::warn!("Search aborted: {:?}", limit),
            // Log the actual error, return generic message
            Self::Internal(e) => tracing::error!("Source lookup failed: {}", e),
        }

        let body = Json(json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidName(e)
    }
}

impl From<LocateError> for ApiError {
    fn from(e: LocateError) -> Self {
        Self::Internal(e)
    }
}
