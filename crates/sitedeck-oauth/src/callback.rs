//! Query parameters the authorization server sends to the callback path.

use std::collections::HashMap;

use crate::error::ExchangeError;

/// What the provider put on the callback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackParams {
    /// An authorization code ready to exchange.
    Code(String),
    /// The provider reported an error (e.g. the user denied consent).
    ///
    /// Takes precedence over a code carried alongside it.
    Denied {
        error: String,
        description: Option<String>,
    },
    /// Neither a code nor an error.
    Malformed,
}

impl CallbackParams {
    /// Read `code`, `error` and `error_description` from a parsed query.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        if let Some(error) = query.get("error").filter(|e| !e.is_empty()) {
            return CallbackParams::Denied {
                error: error.clone(),
                description: query.get("error_description").cloned(),
            };
        }

        match query.get("code").filter(|c| !c.is_empty()) {
            Some(code) => CallbackParams::Code(code.clone()),
            None => CallbackParams::Malformed,
        }
    }

    /// Whether an exchange should be attempted.
    pub fn has_code(&self) -> bool {
        matches!(self, CallbackParams::Code(_))
    }

    /// The code to exchange, or the error that stands in for a failed exchange.
    pub fn into_code(self) -> Result<String, ExchangeError> {
        match self {
            CallbackParams::Code(code) => Ok(code),
            CallbackParams::Denied { error, description } => {
                Err(ExchangeError::Rejected(match description {
                    Some(d) if !d.is_empty() => format!("{}: {}", error, d),
                    _ => error,
                }))
            }
            CallbackParams::Malformed => Err(ExchangeError::MalformedCallback(
                "callback has neither code nor error".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_code() {
        let params = CallbackParams::from_query(&query(&[("code", "XYZ")]));
        assert_eq!(params, CallbackParams::Code("XYZ".to_string()));
        assert!(params.has_code());
        assert_eq!(params.into_code().unwrap(), "XYZ");
    }

    #[test]
    fn test_error_wins_over_code() {
        let params =
            CallbackParams::from_query(&query(&[("code", "XYZ"), ("error", "access_denied")]));
        assert!(!params.has_code());
        assert_eq!(
            params.into_code().unwrap_err(),
            ExchangeError::Rejected("access_denied".to_string())
        );
    }

    #[test]
    fn test_error_with_description() {
        let params = CallbackParams::from_query(&query(&[
            ("error", "access_denied"),
            ("error_description", "user said no"),
        ]));
        assert_eq!(
            params.into_code().unwrap_err(),
            ExchangeError::Rejected("access_denied: user said no".to_string())
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            CallbackParams::from_query(&query(&[])),
            CallbackParams::Malformed
        );
        assert_eq!(
            CallbackParams::from_query(&query(&[("code", "")])),
            CallbackParams::Malformed
        );
        assert_eq!(
            CallbackParams::Malformed.into_code().unwrap_err().kind(),
            "malformed_callback"
        );
    }
}
