//! Session token issued by a successful exchange.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Fixed lifetime of a session cookie (30 days).
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Opaque bearer token held by the client in the session cookie.
///
/// Immutable once created. A later exchange produces a new token that
/// replaces the cookie value; nothing updates one in place.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
    issued_at: DateTime<Utc>,
    max_age: Duration,
}

impl SessionToken {
    /// Create a token issued now with the fixed session lifetime.
    pub fn new(value: impl Into<String>) -> Self {
        Self::issued_at(value, Utc::now())
    }

    /// Create a token with an explicit issue time.
    pub fn issued_at(value: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            issued_at,
            max_age: SESSION_MAX_AGE,
        }
    }

    /// The raw token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When the exchange produced this token.
    pub fn issued_at_time(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Cookie lifetime.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// When the cookie carrying this token expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + chrono::Duration::seconds(self.max_age.as_secs() as i64)
    }
}

// Keep the bearer out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("max_age", &self.max_age)
            .finish()
    }
}
