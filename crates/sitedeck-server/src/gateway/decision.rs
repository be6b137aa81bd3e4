//! The gateway's decision table.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. excluded routes pass through
//! 2. a session on login, root or the callback goes to the landing page
//! 3. a callback with a code is exchanged for a session
//! 4. no session outside the login page goes to the login page
//! 5. a bare site URL goes to its default section
//! 6. everything else passes through
//!
//! Rule 2 comes before rule 3 so that a repeated callback with a live
//! session never spends a second code.

use sitedeck_config::GatewayConfig;
use sitedeck_oauth::{CallbackParams, ExchangeError, SessionToken, TokenExchanger};
use tracing::{debug, warn};

use super::route::RouteCategory;
use super::session::SessionState;

/// What the gateway does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayAction {
    /// Hand the request to the router unchanged.
    Continue,
    /// Answer with a redirect to this path.
    RedirectTo(String),
    /// Set the session cookie, then perform the inner action.
    EstablishSessionAndContinue(SessionToken, Box<GatewayAction>),
}

impl GatewayAction {
    /// Stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayAction::Continue => "continue",
            GatewayAction::RedirectTo(_) => "redirect",
            GatewayAction::EstablishSessionAndContinue(..) => "establish_session",
        }
    }
}

/// Result of evaluating the synchronous rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// No network call needed.
    Decided(GatewayAction),
    /// Rule 3 matched; exchange this code and finish with
    /// [`DecisionEngine::complete_exchange`].
    Exchange(String),
}

/// Pure decision logic over a classified request.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    login_path: String,
    landing_path: String,
    site_default_section: String,
}

impl DecisionEngine {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            landing_path: config.landing_path.clone(),
            site_default_section: config.site_default_section.clone(),
        }
    }

    /// Apply rules 1 to 6 without touching the network.
    pub fn evaluate(
        &self,
        category: &RouteCategory,
        session: &SessionState,
        callback: &CallbackParams,
    ) -> Evaluation {
        if *category == RouteCategory::Excluded {
            return Evaluation::Decided(GatewayAction::Continue);
        }

        if session.is_present()
            && matches!(
                category,
                RouteCategory::Login | RouteCategory::Root | RouteCategory::OAuthCallback
            )
        {
            return Evaluation::Decided(self.to_landing());
        }

        if *category == RouteCategory::OAuthCallback {
            match callback.clone().into_code() {
                Ok(code) => return Evaluation::Exchange(code),
                // A denied or malformed callback resolves like a failed exchange.
                Err(e) => log_exchange_failure(&e),
            }
        }

        Evaluation::Decided(self.route_or_login(category, session))
    }

    /// Finish rule 3 once the exchange has returned.
    pub fn complete_exchange(
        &self,
        outcome: Result<SessionToken, ExchangeError>,
    ) -> GatewayAction {
        match outcome {
            Ok(token) => {
                debug!(expires_at = %token.expires_at(), "session established");
                GatewayAction::EstablishSessionAndContinue(token, Box::new(self.to_landing()))
            }
            Err(e) => {
                log_exchange_failure(&e);
                self.to_login()
            }
        }
    }

    /// Evaluate a request end to end, calling the exchanger when rule 3 matches.
    pub async fn decide(
        &self,
        category: &RouteCategory,
        session: &SessionState,
        callback: &CallbackParams,
        exchanger: &dyn TokenExchanger,
    ) -> GatewayAction {
        match self.evaluate(category, session, callback) {
            Evaluation::Decided(action) => action,
            Evaluation::Exchange(code) => self.complete_exchange(exchanger.exchange(&code).await),
        }
    }

    /// Rules 4 to 6.
    fn route_or_login(&self, category: &RouteCategory, session: &SessionState) -> GatewayAction {
        if !session.is_present() && *category != RouteCategory::Login {
            return self.to_login();
        }

        if let RouteCategory::SiteRoot(site_id) = category {
            return GatewayAction::RedirectTo(format!(
                "/site/{}/{}",
                site_id, self.site_default_section
            ));
        }

        GatewayAction::Continue
    }

    fn to_landing(&self) -> GatewayAction {
        GatewayAction::RedirectTo(self.landing_path.clone())
    }

    fn to_login(&self) -> GatewayAction {
        GatewayAction::RedirectTo(self.login_path.clone())
    }
}

fn log_exchange_failure(error: &ExchangeError) {
    warn!(error_kind = error.kind(), error = %error, "OAuth code exchange failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitedeck_oauth::MockExchanger;

    fn engine() -> DecisionEngine {
        DecisionEngine::new(&GatewayConfig::default())
    }

    fn present() -> SessionState {
        SessionState::Present("tok".to_string())
    }

    fn code(c: &str) -> CallbackParams {
        CallbackParams::Code(c.to_string())
    }

    fn redirect(path: &str) -> GatewayAction {
        GatewayAction::RedirectTo(path.to_string())
    }

    #[test]
    fn test_excluded_always_continues() {
        let e = engine();
        for session in [SessionState::Absent, present()] {
            assert_eq!(
                e.evaluate(&RouteCategory::Excluded, &session, &code("XYZ")),
                Evaluation::Decided(GatewayAction::Continue)
            );
        }
    }

    #[test]
    fn test_session_on_entry_routes_goes_to_landing() {
        let e = engine();
        for category in [
            RouteCategory::Login,
            RouteCategory::Root,
            RouteCategory::OAuthCallback,
        ] {
            assert_eq!(
                e.evaluate(&category, &present(), &code("XYZ")),
                Evaluation::Decided(redirect("/auth-info")),
                "{:?}",
                category
            );
        }
    }

    #[test]
    fn test_callback_with_code_requests_exchange() {
        assert_eq!(
            engine().evaluate(&RouteCategory::OAuthCallback, &SessionState::Absent, &code("XYZ")),
            Evaluation::Exchange("XYZ".to_string())
        );
    }

    #[test]
    fn test_callback_without_code_goes_to_login() {
        let e = engine();
        let denied = CallbackParams::Denied {
            error: "access_denied".to_string(),
            description: None,
        };
        for params in [denied, CallbackParams::Malformed] {
            assert_eq!(
                e.evaluate(&RouteCategory::OAuthCallback, &SessionState::Absent, &params),
                Evaluation::Decided(redirect("/login"))
            );
        }
    }

    #[test]
    fn test_no_session_goes_to_login() {
        let e = engine();
        for category in [
            RouteCategory::Root,
            RouteCategory::Protected,
            RouteCategory::SiteRoot("42".to_string()),
        ] {
            assert_eq!(
                e.evaluate(&category, &SessionState::Absent, &CallbackParams::Malformed),
                Evaluation::Decided(redirect("/login"))
            );
        }
    }

    #[test]
    fn test_login_page_without_session_renders() {
        assert_eq!(
            engine().evaluate(&RouteCategory::Login, &SessionState::Absent, &CallbackParams::Malformed),
            Evaluation::Decided(GatewayAction::Continue)
        );
    }

    #[test]
    fn test_site_root_goes_to_default_section() {
        assert_eq!(
            engine().evaluate(
                &RouteCategory::SiteRoot("42".to_string()),
                &present(),
                &CallbackParams::Malformed
            ),
            Evaluation::Decided(redirect("/site/42/pages"))
        );

        let config = GatewayConfig {
            site_default_section: "custom-code".to_string(),
            ..Default::default()
        };
        assert_eq!(
            DecisionEngine::new(&config).evaluate(
                &RouteCategory::SiteRoot("42".to_string()),
                &present(),
                &CallbackParams::Malformed
            ),
            Evaluation::Decided(redirect("/site/42/custom-code"))
        );
    }

    #[test]
    fn test_protected_with_session_continues() {
        assert_eq!(
            engine().evaluate(&RouteCategory::Protected, &present(), &CallbackParams::Malformed),
            Evaluation::Decided(GatewayAction::Continue)
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let e = engine();
        let categories = [
            RouteCategory::Login,
            RouteCategory::OAuthCallback,
            RouteCategory::Root,
            RouteCategory::SiteRoot("42".to_string()),
            RouteCategory::Protected,
            RouteCategory::Excluded,
        ];
        let callbacks = [
            code("XYZ"),
            CallbackParams::Denied {
                error: "access_denied".to_string(),
                description: None,
            },
            CallbackParams::Malformed,
        ];

        for category in &categories {
            for session in [SessionState::Absent, present()] {
                for callback in &callbacks {
                    let first = e.evaluate(category, &session, callback);
                    let second = e.evaluate(category, &session, callback);
                    assert_eq!(first, second, "{:?} {:?} {:?}", category, session, callback);
                }
            }
        }
    }

    #[test]
    fn test_complete_exchange() {
        let e = engine();
        let token = SessionToken::new("T");
        assert_eq!(
            e.complete_exchange(Ok(token.clone())),
            GatewayAction::EstablishSessionAndContinue(token, Box::new(redirect("/auth-info")))
        );
        assert_eq!(
            e.complete_exchange(Err(ExchangeError::Network("timeout".to_string()))),
            redirect("/login")
        );
    }

    #[tokio::test]
    async fn test_decide_calls_exchanger_once() {
        let exchanger = MockExchanger::succeeding("T");
        let action = engine()
            .decide(
                &RouteCategory::OAuthCallback,
                &SessionState::Absent,
                &code("XYZ"),
                &exchanger,
            )
            .await;

        match action {
            GatewayAction::EstablishSessionAndContinue(token, then) => {
                assert_eq!(token.value(), "T");
                assert_eq!(*then, redirect("/auth-info"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert_eq!(exchanger.codes(), vec!["XYZ"]);
    }

    #[tokio::test]
    async fn test_decide_skips_exchanger_with_session() {
        let exchanger = MockExchanger::succeeding("T");
        let action = engine()
            .decide(&RouteCategory::OAuthCallback, &present(), &code("XYZ"), &exchanger)
            .await;

        assert_eq!(action, redirect("/auth-info"));
        assert_eq!(exchanger.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_exchange_never_sets_cookie() {
        for error in [
            ExchangeError::Network("connection refused".to_string()),
            ExchangeError::Rejected("invalid_grant".to_string()),
        ] {
            let exchanger = MockExchanger::failing(error);
            let action = engine()
                .decide(
                    &RouteCategory::OAuthCallback,
                    &SessionState::Absent,
                    &code("XYZ"),
                    &exchanger,
                )
                .await;
            assert_eq!(action, redirect("/login"));
        }
    }
}
