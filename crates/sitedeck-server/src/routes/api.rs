//! JSON API used by the dashboard front end.
//!
//! These routes are excluded from the gateway, so a missing session is a
//! 401 rather than a redirect.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use sitedeck_client::{CustomCode, Page};
use sitedeck_config::is_identifier;
use tracing::info;

use crate::auth::SessionBearer;
use crate::error::ServerError;
use crate::routes::dashboard::check_site_id;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Query for `GET /api/page`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub id: Option<String>,
}

/// Body of `PUT /api/custom-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteCustomCodeBody {
    pub site_id: String,
    pub code: String,
}

/// Envelope for write results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/page?id= - A single page.
pub async fn get_page_handler(
    State(state): State<AppState>,
    bearer: SessionBearer,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page>, ServerError> {
    let page_id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Missing page id".to_string()))?;
    if !is_identifier(&page_id) {
        return Err(ServerError::BadRequest(format!("Invalid page id '{}'", page_id)));
    }

    let page = state.sites().page(bearer.token(), &page_id).await?;
    Ok(Json(page))
}

/// PUT /api/custom-code - Replace a site's head code.
pub async fn put_custom_code_handler(
    State(state): State<AppState>,
    bearer: SessionBearer,
    Json(body): Json<WriteCustomCodeBody>,
) -> Result<Json<DataResponse<CustomCode>>, ServerError> {
    check_site_id(&body.site_id)?;

    let data = state
        .sites()
        .write_custom_code(bearer.token(), &body.site_id, &body.code)
        .await?;

    info!(site_id = %body.site_id, bytes = body.code.len(), "custom code updated");
    Ok(Json(DataResponse { data }))
}

/// Create API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/page", get(get_page_handler))
        .route("/api/custom-code", put(put_custom_code_handler))
}
