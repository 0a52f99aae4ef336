//! API error types with IntoResponse
//!
//! Every handled failure leaves the server as
//! `{"status": "error", "message": ...}` with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use adboard_core::{AdId, ValidationError, ValidationErrors};

use crate::db::StoreError;

pub const NOT_FOUND_MESSAGE: &str = "ads not found";
pub const CONFLICT_MESSAGE: &str = "ads already exist";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed validation (400)
    Validation(ValidationErrors),

    /// Ad absent (404)
    NotFound { id: Option<AdId> },

    /// Unique constraint violated (400)
    Conflict,

    /// Unexpected store failure (500, logged)
    Database(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Value {
        match self {
            Self::Validation(errors) => json!(errors),
            Self::NotFound { .. } => json!(NOT_FOUND_MESSAGE),
            Self::Conflict => json!(CONFLICT_MESSAGE),
            Self::Database(_) => json!("internal error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation(errors) => tracing::debug!(%errors, "validation failed"),
            Self::NotFound { id } => tracing::debug!(?id, "ad not found"),
            Self::Conflict => tracing::debug!("ad already exists"),
            // Log the actual error, return generic message
            Self::Database(e) => tracing::error!("Database error: {}", e),
        }

        let body = json!({
            "status": "error",
            "message": self.message(),
        });

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => Self::NotFound { id: Some(id) },
            StoreError::Conflict { .. } => Self::Conflict,
            _ => Self::Database(e),
        }
    }
}
