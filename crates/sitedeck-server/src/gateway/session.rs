//! Reading the session cookie off a request.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

/// Whether the request carries a session.
#[derive(Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The cookie is present with a non-empty value.
    Present(String),
    /// No cookie, or an empty one.
    Absent,
}

impl SessionState {
    /// Read the cookie named `cookie_name` from the request headers.
    ///
    /// Only presence is checked. An empty value counts as absent.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        Self::from_jar(&CookieJar::from_headers(headers), cookie_name)
    }

    /// Read the session from an already parsed jar.
    pub fn from_jar(jar: &CookieJar, cookie_name: &str) -> Self {
        match jar.get(cookie_name).map(|c| c.value()) {
            Some(value) if !value.is_empty() => SessionState::Present(value.to_string()),
            _ => SessionState::Absent,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, SessionState::Present(_))
    }

    /// The bearer value, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Present(value) => Some(value),
            SessionState::Absent => None,
        }
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Present(_) => f.write_str("Present([REDACTED])"),
            SessionState::Absent => f.write_str("Absent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn test_present() {
        let state = SessionState::from_headers(&headers("session_token=abc"), "session_token");
        assert_eq!(state, SessionState::Present("abc".to_string()));
        assert_eq!(state.token(), Some("abc"));
    }

    #[test]
    fn test_among_other_cookies() {
        let state = SessionState::from_headers(
            &headers("theme=dark; session_token=abc; lang=en"),
            "session_token",
        );
        assert!(state.is_present());
    }

    #[test]
    fn test_missing_or_empty_is_absent() {
        assert_eq!(
            SessionState::from_headers(&HeaderMap::new(), "session_token"),
            SessionState::Absent
        );
        assert_eq!(
            SessionState::from_headers(&headers("session_token="), "session_token"),
            SessionState::Absent
        );
        assert_eq!(
            SessionState::from_headers(&headers("other=abc"), "session_token"),
            SessionState::Absent
        );
    }

    #[test]
    fn test_debug_redacts_value() {
        let state = SessionState::Present("secret-bearer".to_string());
        assert!(!format!("{:?}", state).contains("secret-bearer"));
    }
}
