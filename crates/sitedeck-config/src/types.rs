//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [server]     # bind address, request logging
//! [gateway]    # session cookie, route paths, exclusion globs
//! [oauth]      # authorization server credentials and endpoints
//! [api]        # remote site API
//! ```

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Environment variable overriding `oauth.client_id`.
pub const CLIENT_ID_ENV: &str = "SITEDECK_CLIENT_ID";

/// Environment variable overriding `oauth.client_secret`.
pub const CLIENT_SECRET_ENV: &str = "SITEDECK_CLIENT_SECRET";

/// Default bind address for the dashboard server.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default request timeout for outbound HTTP calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. a project-local
/// override) can be loaded and merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitedeckConfig {
    /// Server settings.
    pub server: Option<ServerConfig>,

    /// Session gateway settings.
    pub gateway: Option<GatewayConfig>,

    /// OAuth client settings.
    pub oauth: Option<OAuthSection>,

    /// Remote site API settings.
    pub api: Option<ApiConfig>,
}

impl SitedeckConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: SitedeckConfig) {
        if other.server.is_some() {
            self.server = other.server;
        }

        if other.gateway.is_some() {
            self.gateway = other.gateway;
        }

        if other.oauth.is_some() {
            self.oauth = other.oauth;
        }

        if other.api.is_some() {
            self.api = other.api;
        }
    }

    /// Server section, or defaults.
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    /// Gateway section, or defaults.
    pub fn gateway(&self) -> GatewayConfig {
        self.gateway.clone().unwrap_or_default()
    }

    /// API section, or defaults.
    pub fn api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }

    /// OAuth section with environment overrides applied.
    ///
    /// Fails when no client id or secret can be found anywhere.
    pub fn oauth(&self) -> Result<OAuthSection> {
        self.oauth_with_env(|key| std::env::var(key).ok())
    }

    /// Like [`SitedeckConfig::oauth`] with an injectable env lookup.
    pub fn oauth_with_env(&self, env: impl Fn(&str) -> Option<String>) -> Result<OAuthSection> {
        let mut section = self.oauth.clone().unwrap_or_default();

        if let Some(id) = env(CLIENT_ID_ENV).filter(|v| !v.is_empty()) {
            section.client_id = Some(id);
        }
        if let Some(secret) = env(CLIENT_SECRET_ENV).filter(|v| !v.is_empty()) {
            section.client_secret = Some(secret);
        }

        if section.client_id.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingField {
                field: "client_id".to_string(),
                context: format!("[oauth] (or {CLIENT_ID_ENV})"),
            });
        }
        if section.client_secret.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingField {
                field: "client_secret".to_string(),
                context: format!("[oauth] (or {CLIENT_SECRET_ENV})"),
            });
        }

        Ok(section)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────────────────────────────────────

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Enable request logging.
    pub request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            request_logging: true,
        }
    }
}

impl ServerConfig {
    /// Parse the bind address.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| ConfigError::Other(format!("invalid bind address '{}': {}", self.bind, e)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// Session gateway configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Path of the login page.
    pub login_path: String,
    /// Where authenticated users land after login.
    pub landing_path: String,
    /// Path the authorization server redirects back to.
    pub callback_path: String,
    /// Sub-section appended to a bare `/site/{id}` URL.
    pub site_default_section: String,
    /// Path globs that never pass through the gateway.
    pub exclude: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_token".to_string(),
            login_path: "/login".to_string(),
            landing_path: "/auth-info".to_string(),
            callback_path: "/oauth/callback".to_string(),
            site_default_section: "pages".to_string(),
            exclude: default_exclusions(),
        }
    }
}

/// Static assets, the API surface, the favicon and the health check.
pub fn default_exclusions() -> Vec<String> {
    [
        "/api",
        "/api/*",
        "/_next/static/*",
        "/_next/image/*",
        "/static/*",
        "/favicon.ico",
        "/health",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Paths the server routes itself, or owns by prefix.
const RESERVED_ROUTES: &[&str] = &["/logout", "/health", "/api", "/site"];

impl GatewayConfig {
    /// Check route paths and names.
    ///
    /// Glob compilation happens where the patterns are used; this only
    /// covers the plain string fields.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("gateway.login_path", &self.login_path),
            ("gateway.landing_path", &self.landing_path),
            ("gateway.callback_path", &self.callback_path),
        ] {
            if !value.starts_with('/') {
                return Err(invalid_route(field, value, "must start with '/'"));
            }
            if value != "/" && !value[1..].split('/').all(is_identifier) {
                return Err(invalid_route(
                    field,
                    value,
                    "segments must be non-empty and use only [A-Za-z0-9_-]",
                ));
            }
            if RESERVED_ROUTES
                .iter()
                .any(|r| value == r || value.starts_with(&format!("{}/", r)))
            {
                return Err(invalid_route(field, value, "reserved by a built-in route"));
            }
        }

        // Any of these would make the gateway redirect a request to itself.
        if self.login_path == "/" {
            return Err(invalid_route(
                "gateway.login_path",
                &self.login_path,
                "the root path requires a session",
            ));
        }
        if self.login_path == self.callback_path {
            return Err(invalid_route(
                "gateway.login_path",
                &self.login_path,
                "same as gateway.callback_path",
            ));
        }
        if self.landing_path == "/" {
            return Err(invalid_route(
                "gateway.landing_path",
                &self.landing_path,
                "the root path redirects to the landing page",
            ));
        }
        if self.landing_path == self.login_path {
            return Err(invalid_route(
                "gateway.landing_path",
                &self.landing_path,
                "same as gateway.login_path",
            ));
        }
        if self.landing_path == self.callback_path {
            return Err(invalid_route(
                "gateway.landing_path",
                &self.landing_path,
                "same as gateway.callback_path",
            ));
        }

        if !is_identifier(&self.site_default_section) {
            return Err(ConfigError::InvalidSegment {
                field: "gateway.site_default_section".to_string(),
                value: self.site_default_section.clone(),
            });
        }

        if self.cookie_name.is_empty() {
            return Err(ConfigError::MissingField {
                field: "cookie_name".to_string(),
                context: "[gateway]".to_string(),
            });
        }

        Ok(())
    }
}

fn invalid_route(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidRoute {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// True for a non-empty string of `[A-Za-z0-9_-]`.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

// ─────────────────────────────────────────────────────────────────────────────
// OAuth
// ─────────────────────────────────────────────────────────────────────────────

/// OAuth client configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthSection {
    /// OAuth client id.
    pub client_id: Option<String>,
    /// OAuth client secret. Prefer the environment variable.
    pub client_secret: Option<String>,
    /// Authorization (install) URL.
    pub authorize_url: String,
    /// Token exchange URL.
    pub token_url: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
    /// Space-separated scopes.
    pub scope: String,
    /// Transport timeout for the exchange call.
    pub timeout_secs: u64,
}

impl Default for OAuthSection {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            authorize_url: "https://webflow.com/oauth/authorize".to_string(),
            token_url: "https://api.webflow.com/oauth/access_token".to_string(),
            redirect_uri: "http://localhost:3000/oauth/callback".to_string(),
            scope: "authorized_user:read sites:read pages:read custom_code:read custom_code:write"
                .to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OAuthSection {
    /// Whether the secret is stored in the config file itself.
    pub fn has_plaintext_secret(&self) -> bool {
        self.client_secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Site API
// ─────────────────────────────────────────────────────────────────────────────

/// Remote site API configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the site API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.webflow.com/v2/".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
