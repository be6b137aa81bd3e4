//! OAuth 2.0 authorization-code flow against the site provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ExchangeError, Result};
use crate::token::SessionToken;

/// Default transport timeout for the exchange call.
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth client configuration.
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OAuthConfig {
    /// Create a config pointing at the Webflow endpoints.
    pub fn webflow(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorize_url: "https://webflow.com/oauth/authorize".to_string(),
            token_url: "https://api.webflow.com/oauth/access_token".to_string(),
            redirect_uri: "http://localhost:3000/oauth/callback".to_string(),
            scope: "authorized_user:read sites:read pages:read custom_code:read custom_code:write"
                .to_string(),
            timeout: DEFAULT_EXCHANGE_TIMEOUT,
        }
    }

    /// Set the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set the redirect URI.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    /// Set the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Build the authorization (install) URL the login page links to.
pub fn build_authorization_url(config: &OAuthConfig) -> String {
    let params = [
        ("response_type", "code"),
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", config.scope.as_str()),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.authorize_url, query)
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    grant_type: &'static str,
    redirect_uri: &'a str,
}

/// Body returned by the token endpoint.
///
/// Providers sometimes answer `200 OK` with an error payload, so both
/// shapes are accepted here and sorted out afterwards.
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange an authorization code for a session token.
///
/// Makes exactly one request; the timeout comes from the client's transport.
pub async fn exchange_code_for_token(
    client: &reqwest::Client,
    config: &OAuthConfig,
    code: &str,
) -> Result<SessionToken> {
    let request_body = TokenExchangeRequest {
        client_id: &config.client_id,
        client_secret: &config.client_secret,
        code,
        grant_type: "authorization_code",
        redirect_uri: &config.redirect_uri,
    };

    let response = client
        .post(&config.token_url)
        .header("Content-Type", "application/json")
        .json(&request_body)
        .send()
        .await
        .map_err(|e| ExchangeError::Network(format!("Token exchange request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ExchangeError::Rejected(format!(
            "Token exchange failed ({}): {}",
            status.as_u16(),
            error_text
        )));
    }

    let body: TokenExchangeResponse = response
        .json()
        .await
        .map_err(|e| ExchangeError::Rejected(format!("Failed to parse token response: {}", e)))?;

    if let Some(error) = body.error {
        let detail = body.error_description.unwrap_or_default();
        return Err(ExchangeError::Rejected(if detail.is_empty() {
            error
        } else {
            format!("{}: {}", error, detail)
        }));
    }

    let access_token = body
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ExchangeError::Rejected("Token response has no access_token".to_string()))?;

    if let Some(expires_in) = body.expires_in {
        tracing::debug!(expires_in, "Provider reported token lifetime");
    }

    Ok(SessionToken::new(access_token))
}
