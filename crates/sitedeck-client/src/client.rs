//! HTTP implementation of [`SiteApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::api::SiteApi;
use crate::error::{ErrorResponse, Result, UpstreamError};
use crate::types::{
    AuthorizedUser, CustomCode, Page, PagesEnvelope, Site, SitesEnvelope, WriteCustomCodeRequest,
};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Site API client over HTTP.
///
/// The bearer token is supplied per call; one client serves every session.
///
/// # Example
///
/// ```no_run
/// use sitedeck_client::{HttpSiteApi, SiteApi};
///
/// # async fn example() -> sitedeck_client::Result<()> {
/// let api = HttpSiteApi::builder()
///     .base_url("https://api.webflow.com/v2/")
///     .build()?;
///
/// let sites = api.list_sites("bearer-token").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpSiteApi {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for HttpSiteApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSiteApi")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl HttpSiteApi {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(UpstreamError::from)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, token: &str, path: &str) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        let response = self
            .inner
            .http
            .get(url)
            .bearer_auth(token)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn put<T, B>(&self, token: &str, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "PUT");
        let response = self
            .inner
            .http
            .put(url)
            .bearer_auth(token)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        handle_response(response).await
    }
}

#[async_trait]
impl SiteApi for HttpSiteApi {
    async fn authorized_user(&self, token: &str) -> Result<AuthorizedUser> {
        self.get(token, "token/authorized_by").await
    }

    async fn list_sites(&self, token: &str) -> Result<Vec<Site>> {
        let envelope: SitesEnvelope = self.get(token, "sites").await?;
        Ok(envelope.sites)
    }

    async fn site(&self, token: &str, site_id: &str) -> Result<Site> {
        self.get(token, &format!("sites/{}", site_id)).await
    }

    async fn list_pages(&self, token: &str, site_id: &str) -> Result<Vec<Page>> {
        let envelope: PagesEnvelope = self.get(token, &format!("sites/{}/pages", site_id)).await?;
        Ok(envelope.pages)
    }

    async fn page(&self, token: &str, page_id: &str) -> Result<Page> {
        self.get(token, &format!("pages/{}", page_id)).await
    }

    async fn custom_code(&self, token: &str, site_id: &str) -> Result<CustomCode> {
        self.get(token, &format!("sites/{}/custom_code", site_id))
            .await
    }

    async fn write_custom_code(&self, token: &str, site_id: &str, code: &str) -> Result<CustomCode> {
        let body = WriteCustomCodeRequest {
            code: code.to_string(),
        };
        self.put(token, &format!("sites/{}/custom_code", site_id), &body)
            .await
    }
}

/// Handle a response, extracting the body or error.
async fn handle_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(extract_error(response).await)
    }
}

/// Extract an error from a failed response.
async fn extract_error(response: reqwest::Response) -> UpstreamError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|e| e.message.or(e.msg))
        .unwrap_or_else(|| {
            if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                text
            }
        });

    UpstreamError::Status { status, message }
}

/// Builder for creating an [`HttpSiteApi`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL of the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpSiteApi> {
        let base_url = self
            .base_url
            .ok_or_else(|| UpstreamError::Config("base_url is required".to_string()))?;

        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("sitedeck/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(HttpSiteApi {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
