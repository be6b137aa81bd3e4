//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use reqwest::Client;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use sitedeck_client::{AuthorizedUser, MockSiteApi, Page, Site};
use sitedeck_oauth::MockExchanger;
use sitedeck_server::{AppState, Server, ServerConfig};

/// Bearer token the mock site API accepts.
pub const TOKEN: &str = "T";

/// Site API fixture with one user and one site.
pub fn site_api() -> MockSiteApi {
    let mut site = Site::with_id("42");
    site.display_name = Some("Marketing".to_string());

    MockSiteApi::new(TOKEN)
        .with_user(AuthorizedUser {
            id: "u1".to_string(),
            email: Some("owner@example.test".to_string()),
            first_name: Some("Sam".to_string()),
            last_name: None,
        })
        .with_site(
            site,
            vec![Page {
                id: "p1".to_string(),
                site_id: Some("42".to_string()),
                title: Some("Home".to_string()),
                slug: Some("index".to_string()),
                created_on: None,
                last_updated: None,
            }],
        )
}

/// Mocks shared with the router so tests can inspect calls afterwards.
pub struct Harness {
    pub exchanger: Arc<MockExchanger>,
    pub sites: Arc<MockSiteApi>,
    pub state: AppState,
}

impl Harness {
    /// Exchanger that hands out [`TOKEN`].
    pub fn new() -> Self {
        Self::with_exchanger(MockExchanger::succeeding(TOKEN))
    }

    pub fn with_exchanger(exchanger: MockExchanger) -> Self {
        Self::with_config(
            ServerConfig::new()
                .with_request_logging(false)
                .with_install_url("https://auth.example.test/authorize?client_id=abc&scope=sites:read"),
            exchanger,
        )
    }

    pub fn with_config(config: ServerConfig, exchanger: MockExchanger) -> Self {
        let exchanger = Arc::new(exchanger);
        let sites = Arc::new(site_api());
        let state = AppState::new(config, exchanger.clone(), sites.clone())
            .expect("valid test config");
        Self {
            exchanger,
            sites,
            state,
        }
    }

    /// The full router, middleware included.
    pub fn router(&self) -> Router {
        Server::from_state(self.state.clone()).router()
    }
}

/// A test server that runs in the background.
pub struct TestServer {
    /// The server's address.
    pub addr: SocketAddr,
    /// HTTP client that does not follow redirects.
    pub client: Client,
    pub harness: Harness,
    shutdown: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on a free port.
    pub async fn start() -> Result<Self> {
        let harness = Harness::new();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let server = Server::from_state(harness.state.clone());
        let handle = tokio::spawn(async move {
            let _ = server
                .serve(listener, async {
                    let _ = rx.await;
                })
                .await;
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        wait_for_server(&client, addr).await?;

        Ok(Self {
            addr,
            client,
            harness,
            shutdown: Some(tx),
            _handle: handle,
        })
    }

    /// Get the base URL for the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url(), path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url(), path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(format!("{}{}", self.base_url(), path))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Wait for the server to become ready.
async fn wait_for_server(client: &Client, addr: SocketAddr) -> Result<()> {
    let url = format!("http://{}/health", addr);

    let result = timeout(Duration::from_secs(5), async {
        loop {
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return,
                _ => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
    })
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(_) => anyhow::bail!("Timeout waiting for server to start"),
    }
}
