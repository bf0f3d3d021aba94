//! Typed error handling for the listings service
//!
//! Every handler returns [`ListingError`]; the mapping to HTTP status codes
//! and response bodies lives here and nowhere else.
//!
//! # Error Categories
//!
//! - malformed identifier → 400
//! - validation failure → 400 with per-field details
//! - document not found → 404
//! - storage/unhandled failure → 500 with a short message

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The error type shared by all listing operations.
#[derive(Debug)]
pub enum ListingError {
    /// The path identifier is not a valid ObjectId.
    MalformedId { id: String },

    /// No listing exists under the identifier.
    NotFound { id: String },

    /// The payload violates the listing schema.
    Validation { errors: Vec<String> },

    /// The store (or anything beneath it) failed.
    Storage { message: String },
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingError::MalformedId { id } => write!(f, "Invalid listing id '{}'", id),
            ListingError::NotFound { id } => write!(f, "Listing '{}' not found", id),
            ListingError::Validation { errors } => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            ListingError::Storage { message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for ListingError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingError::MalformedId { .. } => StatusCode::BAD_REQUEST,
            ListingError::NotFound { .. } => StatusCode::NOT_FOUND,
            ListingError::Validation { .. } => StatusCode::BAD_REQUEST,
            ListingError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListingError::MalformedId { .. } => "INVALID_LISTING_ID",
            ListingError::NotFound { .. } => "LISTING_NOT_FOUND",
            ListingError::Validation { .. } => "VALIDATION_ERROR",
            ListingError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ListingError::Validation { errors } => Some(serde_json::json!({ "fields": errors })),
            _ => None,
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ListingError {
    fn from(err: anyhow::Error) -> Self {
        ListingError::Storage {
            message: err.to_string(),
        }
    }
}
