//! Server configuration.

use std::net::SocketAddr;

use sitedeck_config::GatewayConfig;

/// Default port for the dashboard.
pub const DEFAULT_PORT: u16 = 3000;

/// Default max body size for REST requests (1 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Enable request logging.
    pub request_logging: bool,

    /// Maximum REST request body size in bytes.
    pub max_body_size: usize,

    /// Gateway routes, cookie name and exclusions.
    pub gateway: GatewayConfig,

    /// Authorization URL linked from the login page. `None` means OAuth is
    /// not configured and the page says so.
    pub install_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            request_logging: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            gateway: GatewayConfig::default(),
            install_url: None,
        }
    }
}

impl ServerConfig {
    /// Create a server config with default gateway settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Enable or disable request logging.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }

    /// Set the maximum REST request body size.
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Replace the gateway settings.
    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = gateway;
        self
    }

    /// Set the authorization URL shown on the login page.
    pub fn with_install_url(mut self, url: impl Into<String>) -> Self {
        self.install_url = Some(url.into());
        self
    }
}
