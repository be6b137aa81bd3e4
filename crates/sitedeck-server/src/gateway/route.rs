//! Route classification.
//!
//! Exclusion globs and route paths are compiled once when the gateway is
//! built; classifying a request only compares strings.

use std::collections::HashMap;

use glob::Pattern;
use sitedeck_config::{ConfigError, GatewayConfig, is_identifier};

/// What kind of route a request targets, as far as the gateway cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteCategory {
    /// The login page.
    Login,
    /// Where the authorization server sends the user back.
    OAuthCallback,
    /// `/`.
    Root,
    /// A bare `/site/{id}`.
    SiteRoot(String),
    /// Everything else that requires a session.
    Protected,
    /// Assets, the API namespace and other paths the gateway ignores.
    Excluded,
}

impl RouteCategory {
    /// Stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::Login => "login",
            RouteCategory::OAuthCallback => "oauth_callback",
            RouteCategory::Root => "root",
            RouteCategory::SiteRoot(_) => "site_root",
            RouteCategory::Protected => "protected",
            RouteCategory::Excluded => "excluded",
        }
    }
}

/// Prefix of per-site dashboard routes.
const SITE_PREFIX: &str = "/site/";

/// Maps a request path (and whether its query looks like a callback) to a
/// [`RouteCategory`].
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    exclusions: Vec<Pattern>,
    login_path: String,
    callback_path: String,
}

impl RouteClassifier {
    /// Compile the exclusion list. An invalid glob is a startup error.
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let exclusions = config
            .exclude
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| ConfigError::InvalidGlobPattern {
                    pattern: raw.clone(),
                    message: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            exclusions,
            login_path: config.login_path.clone(),
            callback_path: config.callback_path.clone(),
        })
    }

    /// Classify a request.
    ///
    /// Total over every path: anything not matched earlier is `Protected`.
    /// A root request carrying `code` or `error` is treated as a callback so
    /// providers registered with the site root as redirect URI still work.
    pub fn classify(&self, path: &str, query: &HashMap<String, String>) -> RouteCategory {
        if self.is_excluded(path) {
            return RouteCategory::Excluded;
        }

        if path == self.callback_path {
            return RouteCategory::OAuthCallback;
        }

        if path == "/" {
            if query.contains_key("code") || query.contains_key("error") {
                return RouteCategory::OAuthCallback;
            }
            return RouteCategory::Root;
        }

        if path == self.login_path {
            return RouteCategory::Login;
        }

        if let Some(site_id) = path.strip_prefix(SITE_PREFIX)
            && is_identifier(site_id)
        {
            return RouteCategory::SiteRoot(site_id.to_string());
        }

        RouteCategory::Protected
    }

    /// Whether the path matches the exclusion list.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclusions.iter().any(|p| p.matches(path))
    }
}
