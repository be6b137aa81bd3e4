//! Error types for the token exchange.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Ways a code-for-token exchange can fail.
///
/// The gateway treats every variant the same way (the request is
/// unauthenticated); the distinction exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// Transport failure reaching the authorization server.
    #[error("Network error: {0}")]
    Network(String),

    /// The authorization server answered with an error.
    #[error("Exchange rejected: {0}")]
    Rejected(String),

    /// Callback hit without a code or an error parameter.
    #[error("Malformed callback: {0}")]
    MalformedCallback(String),

    /// Client misconfiguration.
    #[error("Config error: {0}")]
    Config(String),
}

impl ExchangeError {
    /// Short machine-readable name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::Network(_) => "network",
            ExchangeError::Rejected(_) => "rejected",
            ExchangeError::MalformedCallback(_) => "malformed_callback",
            ExchangeError::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(e: reqwest::Error) -> Self {
        ExchangeError::Network(e.to_string())
    }
}
