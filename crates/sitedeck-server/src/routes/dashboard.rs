//! Dashboard pages behind the gateway.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use sitedeck_client::{AuthorizedUser, CustomCode, Page, Site};
use sitedeck_config::is_identifier;

use crate::auth::SessionBearer;
use crate::error::ServerError;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Landing page body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthInfoResponse {
    /// Who granted access.
    pub user: AuthorizedUser,
    /// Sites the session can manage.
    pub sites: Vec<Site>,
}

/// Pages of one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePagesResponse {
    pub site: Site,
    pub pages: Vec<Page>,
}

/// Head code of one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteCustomCodeResponse {
    pub site: Site,
    pub custom_code: CustomCode,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /auth-info - The authorized user and their sites.
pub async fn auth_info_handler(
    State(state): State<AppState>,
    bearer: SessionBearer,
) -> Result<Json<AuthInfoResponse>, ServerError> {
    let sites = state.sites();
    let (user, site_list) = tokio::try_join!(
        sites.authorized_user(bearer.token()),
        sites.list_sites(bearer.token()),
    )?;

    Ok(Json(AuthInfoResponse {
        user,
        sites: site_list,
    }))
}

/// GET /site/{id}/pages - Site metadata and its pages.
pub async fn site_pages_handler(
    State(state): State<AppState>,
    bearer: SessionBearer,
    Path(site_id): Path<String>,
) -> Result<Json<SitePagesResponse>, ServerError> {
    check_site_id(&site_id)?;
    let sites = state.sites();
    let (site, pages) = tokio::try_join!(
        sites.site(bearer.token(), &site_id),
        sites.list_pages(bearer.token(), &site_id),
    )?;

    Ok(Json(SitePagesResponse { site, pages }))
}

/// GET /site/{id}/custom-code - Site metadata and its head code.
pub async fn site_custom_code_handler(
    State(state): State<AppState>,
    bearer: SessionBearer,
    Path(site_id): Path<String>,
) -> Result<Json<SiteCustomCodeResponse>, ServerError> {
    check_site_id(&site_id)?;
    let sites = state.sites();
    let (site, custom_code) = tokio::try_join!(
        sites.site(bearer.token(), &site_id),
        sites.custom_code(bearer.token(), &site_id),
    )?;

    Ok(Json(SiteCustomCodeResponse { site, custom_code }))
}

pub(crate) fn check_site_id(site_id: &str) -> Result<(), ServerError> {
    if is_identifier(site_id) {
        Ok(())
    } else {
        Err(ServerError::BadRequest(format!("Invalid site id: {}", site_id)))
    }
}

/// Create dashboard routes.
pub fn dashboard_routes(landing_path: &str) -> Router<AppState> {
    Router::new()
        .route(landing_path, get(auth_info_handler))
        .route("/site/{id}/pages", get(site_pages_handler))
        .route("/site/{id}/custom-code", get(site_custom_code_handler))
}
