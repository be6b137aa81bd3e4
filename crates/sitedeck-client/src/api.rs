//! The site API capability consumed by dashboard handlers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AuthorizedUser, CustomCode, Page, Site};

/// Operations on the remote site API, each performed with a bearer token.
///
/// Every method fails with [`crate::UpstreamError`] on a non-2xx answer or a
/// transport failure.
#[async_trait]
pub trait SiteApi: Send + Sync + std::fmt::Debug {
    /// The user who granted the token.
    async fn authorized_user(&self, token: &str) -> Result<AuthorizedUser>;

    /// Sites the token can access.
    async fn list_sites(&self, token: &str) -> Result<Vec<Site>>;

    /// Site metadata.
    async fn site(&self, token: &str, site_id: &str) -> Result<Site>;

    /// Pages of a site.
    async fn list_pages(&self, token: &str, site_id: &str) -> Result<Vec<Page>>;

    /// A single page.
    async fn page(&self, token: &str, page_id: &str) -> Result<Page>;

    /// Head code currently injected into a site.
    async fn custom_code(&self, token: &str, site_id: &str) -> Result<CustomCode>;

    /// Replace the head code of a site.
    async fn write_custom_code(&self, token: &str, site_id: &str, code: &str) -> Result<CustomCode>;
}

/// A site API that can be shared across threads.
pub type SharedSiteApi = Arc<dyn SiteApi>;
