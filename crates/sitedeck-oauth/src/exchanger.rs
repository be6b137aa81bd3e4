//! Token exchange adapter.
//!
//! The gateway only sees [`TokenExchanger`]; the HTTP implementation and the
//! test mock both sit behind it.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ExchangeError, Result};
use crate::oauth::{OAuthConfig, exchange_code_for_token};
use crate::token::SessionToken;

/// Exchanges an authorization code for a session token.
#[async_trait]
pub trait TokenExchanger: Send + Sync + std::fmt::Debug {
    /// Perform one exchange. Implementations must not retry.
    async fn exchange(&self, code: &str) -> Result<SessionToken>;
}

/// An exchanger that can be shared across threads.
pub type SharedExchanger = Arc<dyn TokenExchanger>;

// ─────────────────────────────────────────────────────────────────────────────
// HttpTokenExchanger
// ─────────────────────────────────────────────────────────────────────────────

/// Exchanger that calls the provider's token endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    client: reqwest::Client,
    config: OAuthConfig,
}

impl HttpTokenExchanger {
    /// Build an exchanger whose transport times out after `config.timeout`.
    pub fn new(config: OAuthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExchangeError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// The OAuth configuration in use.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange(&self, code: &str) -> Result<SessionToken> {
        exchange_code_for_token(&self.client, &self.config, code).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MockExchanger
// ─────────────────────────────────────────────────────────────────────────────

/// A mock exchanger for testing purposes.
///
/// Returns one fixed outcome for every call and records the codes it saw.
#[derive(Debug)]
pub struct MockExchanger {
    outcome: Result<String>,
    codes: Mutex<Vec<String>>,
}

impl MockExchanger {
    /// Every exchange succeeds with `token`.
    pub fn succeeding(token: impl Into<String>) -> Self {
        Self {
            outcome: Ok(token.into()),
            codes: Mutex::new(Vec::new()),
        }
    }

    /// Every exchange fails with `error`.
    pub fn failing(error: ExchangeError) -> Self {
        Self {
            outcome: Err(error),
            codes: Mutex::new(Vec::new()),
        }
    }

    /// Codes passed to [`TokenExchanger::exchange`], in order.
    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }

    /// Number of exchanges attempted.
    pub fn call_count(&self) -> usize {
        self.codes.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenExchanger for MockExchanger {
    async fn exchange(&self, code: &str) -> Result<SessionToken> {
        self.codes.lock().unwrap().push(code.to_string());
        self.outcome.clone().map(SessionToken::new)
    }
}
