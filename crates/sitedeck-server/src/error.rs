//! Error types for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sitedeck_client::UpstreamError;
use thiserror::Error;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No usable session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The site API failed or was unreachable.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] sitedeck_config::ConfigError),
}

impl From<UpstreamError> for ServerError {
    fn from(e: UpstreamError) -> Self {
        if e.is_auth_error() {
            return ServerError::Unauthorized(format!("Session rejected by site API: {}", e));
        }
        if e.is_not_found() {
            return ServerError::NotFound(e.to_string());
        }
        match e {
            UpstreamError::Config(msg) => ServerError::Internal(msg),
            other => ServerError::Upstream(other.to_string()),
        }
    }
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ServerError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ServerError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error")
            }
            ServerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        };

        let message = self.to_string();

        match &self {
            ServerError::Internal(_)
            | ServerError::Serialization(_)
            | ServerError::Config(_)
            | ServerError::Upstream(_) => {
                tracing::error!(status = %status, code, error = %message, "Server error");
            }
            _ => {
                tracing::warn!(status = %status, code, error = %message, "Client error");
            }
        }

        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_mapping() {
        let unauthorized: ServerError = UpstreamError::Status {
            status: 401,
            message: "expired".to_string(),
        }
        .into();
        assert!(matches!(unauthorized, ServerError::Unauthorized(_)));

        let missing: ServerError = UpstreamError::NotFound("site s1".to_string()).into();
        assert!(matches!(missing, ServerError::NotFound(_)));

        let failed: ServerError = UpstreamError::Status {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(failed, ServerError::Upstream(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServerError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServerError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServerError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (ServerError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
