//! Session gateway.
//!
//! Every request passes through [`gateway_middleware`] before routing. The
//! middleware classifies the path, reads the session cookie, runs the
//! decision table and applies the resulting [`GatewayAction`].

pub mod cookie;
pub mod decision;
pub mod route;
pub mod session;

use std::collections::HashMap;

use axum::extract::{Query, Request, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use sitedeck_config::{ConfigError, GatewayConfig};
use sitedeck_oauth::{CallbackParams, TokenExchanger};
use tracing::debug;

pub use cookie::CookieWriter;
pub use decision::{DecisionEngine, Evaluation, GatewayAction};
pub use route::{RouteCategory, RouteClassifier};
pub use session::SessionState;

use crate::auth::SessionBearer;
use crate::state::AppState;

/// Classifier, decision engine and cookie writer built from one
/// [`GatewayConfig`].
#[derive(Debug, Clone)]
pub struct Gateway {
    classifier: RouteClassifier,
    engine: DecisionEngine,
    cookies: CookieWriter,
}

impl Gateway {
    /// Validate the configuration and compile the exclusion list.
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: RouteClassifier::new(config)?,
            engine: DecisionEngine::new(config),
            cookies: CookieWriter::new(config.cookie_name.clone()),
        })
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn cookies(&self) -> &CookieWriter {
        &self.cookies
    }

    /// Read the session for this request.
    pub fn session(&self, headers: &HeaderMap) -> SessionState {
        SessionState::from_headers(headers, self.cookies.name())
    }

    /// Decide what to do with a request.
    pub async fn decide(
        &self,
        uri: &Uri,
        headers: &HeaderMap,
        exchanger: &dyn TokenExchanger,
    ) -> GatewayAction {
        let query = parse_query(uri);
        let category = self.classifier.classify(uri.path(), &query);
        let session = self.session(headers);
        let callback = CallbackParams::from_query(&query);

        let action = self
            .engine
            .decide(&category, &session, &callback, exchanger)
            .await;

        debug!(
            path = %uri.path(),
            route = category.as_str(),
            session = session.is_present(),
            action = action.as_str(),
            "gateway decision"
        );

        action
    }

    /// Turn an action into a response, running the router for `Continue`.
    ///
    /// `bearer` is the session already on the request, if any; it is made
    /// available to handlers as a [`SessionBearer`] extension.
    pub async fn apply(
        &self,
        action: GatewayAction,
        bearer: Option<String>,
        mut request: Request,
        next: Next,
    ) -> Response {
        // 307 keeps the method, which only makes sense for reads.
        let preserve_method = matches!(*request.method(), Method::GET | Method::HEAD);
        let mut jar = CookieJar::new();
        let mut bearer = bearer;
        let mut action = action;

        let response = loop {
            match action {
                GatewayAction::EstablishSessionAndContinue(token, then) => {
                    jar = self.cookies.establish(jar, &token);
                    bearer = Some(token.value().to_string());
                    action = *then;
                }
                GatewayAction::RedirectTo(path) if preserve_method => {
                    break Redirect::temporary(&path).into_response();
                }
                GatewayAction::RedirectTo(path) => {
                    break Redirect::to(&path).into_response();
                }
                GatewayAction::Continue => {
                    if let Some(token) = bearer.take() {
                        request.extensions_mut().insert(SessionBearer::new(token));
                    }
                    break next.run(request).await;
                }
            }
        };

        (jar, response).into_response()
    }
}

/// Parse the query string; an unparseable query reads as empty.
fn parse_query(uri: &Uri) -> HashMap<String, String> {
    Query::<HashMap<String, String>>::try_from_uri(uri)
        .map(|Query(q)| q)
        .unwrap_or_default()
}

/// Middleware running the gateway in front of every route.
pub async fn gateway_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let gateway = state.gateway();
    // Owned copies; the request body is not Sync and cannot be borrowed across an await.
    let uri = request.uri().clone();
    let headers = request.headers().clone();

    let action = gateway
        .decide(&uri, &headers, state.exchanger().as_ref())
        .await;
    let bearer = gateway.session(&headers).token().map(str::to_string);

    gateway.apply(action, bearer, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use sitedeck_oauth::MockExchanger;

    fn gateway() -> Gateway {
        Gateway::new(&GatewayConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GatewayConfig {
            landing_path: "auth-info".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Gateway::new(&config),
            Err(ConfigError::InvalidRoute { .. })
        ));
    }

    #[test]
    fn test_self_redirecting_config_is_rejected() {
        for config in [
            GatewayConfig {
                login_path: "/".to_string(),
                ..Default::default()
            },
            GatewayConfig {
                login_path: "/oauth/callback".to_string(),
                ..Default::default()
            },
            GatewayConfig {
                landing_path: "/login".to_string(),
                ..Default::default()
            },
        ] {
            assert!(
                matches!(Gateway::new(&config), Err(ConfigError::InvalidRoute { .. })),
                "{:?}",
                config
            );
        }
    }

    #[tokio::test]
    async fn test_decide_from_uri() {
        let g = gateway();
        let exchanger = MockExchanger::succeeding("T");

        let uri: Uri = "/oauth/callback?code=XYZ".parse().unwrap();
        let action = g.decide(&uri, &HeaderMap::new(), &exchanger).await;
        assert!(matches!(action, GatewayAction::EstablishSessionAndContinue(..)));
        assert_eq!(exchanger.codes(), vec!["XYZ"]);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "session_token=abc".parse().unwrap());
        let uri: Uri = "/site/42".parse().unwrap();
        assert_eq!(
            g.decide(&uri, &headers, &exchanger).await,
            GatewayAction::RedirectTo("/site/42/pages".to_string())
        );
    }

    #[test]
    fn test_parse_query() {
        let uri: Uri = "/?code=a%20b&state=x".parse().unwrap();
        let query = parse_query(&uri);
        assert_eq!(query.get("code").map(String::as_str), Some("a b"));

        let uri: Uri = "/".parse().unwrap();
        assert!(parse_query(&uri).is_empty());
    }
}
