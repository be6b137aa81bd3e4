//! Session bearer extraction for handlers.
//!
//! The gateway inserts a [`SessionBearer`] into the request extensions when
//! it lets an authenticated request through. Routes the gateway skips (the
//! `/api` namespace) have no extension, so the extractor falls back to
//! reading the session cookie itself.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ServerError;
use crate::gateway::SessionState;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Bearer
// ─────────────────────────────────────────────────────────────────────────────

/// The bearer token from the caller's session cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionBearer(String);

impl SessionBearer {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header of upstream calls.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionBearer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionBearer([REDACTED])")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extractor
// ─────────────────────────────────────────────────────────────────────────────

impl FromRequestParts<AppState> for SessionBearer {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(bearer) = parts.extensions.get::<SessionBearer>() {
            return Ok(bearer.clone());
        }

        match state.gateway().session(&parts.headers) {
            SessionState::Present(token) => Ok(SessionBearer(token)),
            SessionState::Absent => Err(ServerError::Unauthorized(
                "Missing session cookie".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header::COOKIE},
        routing::get,
    };
    use sitedeck_client::MockSiteApi;
    use sitedeck_oauth::MockExchanger;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn create_test_router() -> Router {
        let state = AppState::new(
            ServerConfig::new(),
            Arc::new(MockExchanger::succeeding("T")),
            Arc::new(MockSiteApi::new("T")),
        )
        .unwrap();

        Router::new()
            .route("/whoami", get(|bearer: SessionBearer| async move { bearer.token().to_string() }))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_bearer_from_cookie() {
        let response = create_test_router()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(COOKIE, "session_token=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"abc");
    }

    #[tokio::test]
    async fn test_bearer_from_extension_wins() {
        let mut request = Request::builder()
            .uri("/whoami")
            .header(COOKIE, "session_token=stale")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(SessionBearer::new("fresh"));

        let response = create_test_router().oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"fresh");
    }

    #[tokio::test]
    async fn test_missing_cookie_is_unauthorized() {
        let response = create_test_router()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_debug_redacts() {
        assert!(!format!("{:?}", SessionBearer::new("secret")).contains("secret"));
    }
}
