//! Client-side error type

use thiserror::Error;

/// Errors surfaced by the API client and the components built on it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server has no listing under the requested identifier.
    #[error("listing not found")]
    NotFound,

    /// The server rejected the request (validation, malformed id, ...).
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a server response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
