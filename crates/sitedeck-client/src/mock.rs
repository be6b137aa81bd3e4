//! In-memory [`SiteApi`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::SiteApi;
use crate::error::{Result, UpstreamError};
use crate::types::{AuthorizedUser, CustomCode, Page, Site};

/// A mock site API for testing purposes.
///
/// Accepts only the bearer tokens it was told about; any other token gets a
/// 401, the way the real API answers an expired session.
#[derive(Debug, Default)]
pub struct MockSiteApi {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    tokens: Vec<String>,
    user: Option<AuthorizedUser>,
    sites: Vec<Site>,
    pages: HashMap<String, Vec<Page>>,
    custom_code: HashMap<String, CustomCode>,
    calls: Vec<String>,
}

impl MockSiteApi {
    /// Create an empty mock that accepts `token`.
    pub fn new(token: impl Into<String>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().tokens.push(token.into());
        api
    }

    /// Set the authorized user.
    pub fn with_user(self, user: AuthorizedUser) -> Self {
        self.state.lock().unwrap().user = Some(user);
        self
    }

    /// Add a site with its pages.
    pub fn with_site(self, site: Site, pages: Vec<Page>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.pages.insert(site.id.clone(), pages);
            state.sites.push(site);
        }
        self
    }

    /// Operation names called so far, e.g. `"list_pages:s1"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn check(&self, token: &str, call: String) -> Result<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if !state.tokens.iter().any(|t| t == token) {
            return Err(UpstreamError::Status {
                status: 401,
                message: "invalid bearer token".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl SiteApi for MockSiteApi {
    async fn authorized_user(&self, token: &str) -> Result<AuthorizedUser> {
        let state = self.check(token, "authorized_user".to_string())?;
        state
            .user
            .clone()
            .ok_or_else(|| UpstreamError::NotFound("authorized user".to_string()))
    }

    async fn list_sites(&self, token: &str) -> Result<Vec<Site>> {
        let state = self.check(token, "list_sites".to_string())?;
        Ok(state.sites.clone())
    }

    async fn site(&self, token: &str, site_id: &str) -> Result<Site> {
        let state = self.check(token, format!("site:{}", site_id))?;
        state
            .sites
            .iter()
            .find(|s| s.id == site_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound(format!("site {}", site_id)))
    }

    async fn list_pages(&self, token: &str, site_id: &str) -> Result<Vec<Page>> {
        let state = self.check(token, format!("list_pages:{}", site_id))?;
        state
            .pages
            .get(site_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound(format!("site {}", site_id)))
    }

    async fn page(&self, token: &str, page_id: &str) -> Result<Page> {
        let state = self.check(token, format!("page:{}", page_id))?;
        state
            .pages
            .values()
            .flatten()
            .find(|p| p.id == page_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound(format!("page {}", page_id)))
    }

    async fn custom_code(&self, token: &str, site_id: &str) -> Result<CustomCode> {
        let state = self.check(token, format!("custom_code:{}", site_id))?;
        if !state.sites.iter().any(|s| s.id == site_id) {
            return Err(UpstreamError::NotFound(format!("site {}", site_id)));
        }
        Ok(state.custom_code.get(site_id).cloned().unwrap_or_default())
    }

    async fn write_custom_code(&self, token: &str, site_id: &str, code: &str) -> Result<CustomCode> {
        let mut state = self.check(token, format!("write_custom_code:{}", site_id))?;
        if !state.sites.iter().any(|s| s.id == site_id) {
            return Err(UpstreamError::NotFound(format!("site {}", site_id)));
        }
        let written = CustomCode {
            code: code.to_string(),
            last_updated: None,
        };
        state
            .custom_code
            .insert(site_id.to_string(), written.clone());
        Ok(written)
    }
}
