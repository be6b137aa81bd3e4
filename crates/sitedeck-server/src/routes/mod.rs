//! HTTP routes.

pub mod api;
pub mod dashboard;
pub mod health;
pub mod login;

use crate::error::ServerError;

pub use api::{DataResponse, PageQuery, WriteCustomCodeBody, api_routes};
pub use dashboard::{
    AuthInfoResponse, SiteCustomCodeResponse, SitePagesResponse, dashboard_routes,
};
pub use health::{HealthResponse, health_routes};
pub use login::login_routes;

/// Fallback for unknown paths. Reached only with a session.
pub async fn not_found(uri: axum::http::Uri) -> ServerError {
    ServerError::NotFound(format!("No route for {}", uri.path()))
}
