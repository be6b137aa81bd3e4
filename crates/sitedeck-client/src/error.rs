//! Client error types.

use thiserror::Error;

/// Failure talking to the remote site API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed (transport, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-2xx status.
    #[error("Upstream error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: String,
    },

    /// Resource not found in the mock or upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl UpstreamError {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound(_))
            || matches!(self, UpstreamError::Status { status: 404, .. })
    }

    /// Check if the upstream rejected the bearer token.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, UpstreamError::Status { status: 401 | 403, .. })
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Error body returned by the API.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}
