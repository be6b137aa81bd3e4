//! Application state shared across handlers.

use std::sync::Arc;

use sitedeck_client::SharedSiteApi;
use sitedeck_oauth::SharedExchanger;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::gateway::Gateway;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Compiled gateway.
    pub gateway: Arc<Gateway>,

    /// Exchanges callback codes for session tokens.
    pub exchanger: SharedExchanger,

    /// Remote site API used by dashboard handlers.
    pub sites: SharedSiteApi,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Fails if the gateway configuration is invalid, e.g. an exclusion glob
    /// does not compile.
    pub fn new(config: ServerConfig, exchanger: SharedExchanger, sites: SharedSiteApi) -> Result<Self> {
        let gateway = Gateway::new(&config.gateway)?;
        Ok(Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            exchanger,
            sites,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn exchanger(&self) -> &SharedExchanger {
        &self.exchanger
    }

    pub fn sites(&self) -> &SharedSiteApi {
        &self.sites
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("exchanger", &self.exchanger)
            .field("sites", &self.sites)
            .finish()
    }
}
