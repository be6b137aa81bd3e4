//! Writing and clearing the session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sitedeck_oauth::SessionToken;

/// Builds the `Set-Cookie` values for the session.
#[derive(Debug, Clone)]
pub struct CookieWriter {
    name: String,
}

impl CookieWriter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The session cookie for `token`.
    ///
    /// HttpOnly, Secure, SameSite=Strict, Path=/ and a Max-Age taken from
    /// the token.
    pub fn session_cookie(&self, token: &SessionToken) -> Cookie<'static> {
        let max_age = time::Duration::seconds(token.max_age().as_secs() as i64);
        self.build(token.value().to_string(), max_age)
    }

    /// A cookie that clears the session in the browser.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.build(String::new(), time::Duration::ZERO)
    }

    /// Add the session cookie to `jar`.
    pub fn establish(&self, jar: CookieJar, token: &SessionToken) -> CookieJar {
        jar.add(self.session_cookie(token))
    }

    /// Add the removal cookie to `jar`.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal_cookie())
    }

    fn build(&self, value: String, max_age: time::Duration) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(max_age)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let writer = CookieWriter::new("session_token");
        let cookie = writer.session_cookie(&SessionToken::new("abc"));

        assert_eq!(cookie.name(), "session_token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));

        let header = cookie.to_string();
        assert!(header.contains("Max-Age=2592000"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Secure"));
        assert!(header.contains("SameSite=Strict"));
    }

    #[test]
    fn test_removal_cookie() {
        let cookie = CookieWriter::new("session_token").removal_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_establish_adds_one_cookie() {
        let writer = CookieWriter::new("session_token");
        let jar = writer.establish(CookieJar::new(), &SessionToken::new("abc"));
        assert_eq!(jar.iter().count(), 1);
        assert_eq!(jar.get("session_token").map(|c| c.value()), Some("abc"));
    }
}
