//! Login page and logout.

use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::state::AppState;

/// GET /login - Page linking to the authorization server.
///
/// Only reached without a session; the gateway sends signed-in users to the
/// landing page.
pub async fn login_page(State(state): State<AppState>) -> Html<String> {
    let body = match state.config().install_url.as_deref() {
        Some(url) => format!(
            r#"<p><a href="{}">Connect your sites</a></p>"#,
            escape_html(url)
        ),
        None => "<p>OAuth is not configured for this dashboard.</p>".to_string(),
    };

    Html(format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Sign in</title></head>\n<body>\n<h1>Sign in</h1>\n{}\n</body>\n</html>\n",
        body
    ))
}

/// POST /logout - Clear the session cookie and return to the login page.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.gateway();
    info!("session cleared");
    (
        gateway.cookies().clear(CookieJar::new()),
        Redirect::to(&state.config().gateway.login_path),
    )
}

/// Create login and logout routes.
pub fn login_routes(login_path: &str) -> Router<AppState> {
    Router::new()
        .route(login_path, get(login_page))
        .route("/logout", post(logout))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("https://x.test/authorize?a=1&b=\"2\""),
            "https://x.test/authorize?a=1&amp;b=&quot;2&quot;"
        );
    }
}
