//! Start command - launches the dashboard server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use sitedeck_client::HttpSiteApi;
use sitedeck_oauth::HttpTokenExchanger;
use sitedeck_server::{AppState, Server, ServerConfig};

use super::Context;

/// Arguments for the start command.
///
/// CLI arguments override config file values.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Path to config file (overrides default discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the start command.
pub async fn run(args: StartArgs, ctx: &Context) -> Result<()> {
    // ── Load configuration ──────────────────────────────────────────────

    let loaded = super::load(args.config.as_deref(), ctx)?;
    let config = &loaded.config;

    let server_section = config.server();
    let mut addr = match args.bind {
        Some(ref bind) => resolve_bind(bind, &server_section.bind_address()?)?,
        None => server_section.bind_address()?,
    };
    if let Some(port) = args.port {
        addr.set_port(port);
    }

    // ── OAuth ───────────────────────────────────────────────────────────

    let oauth_section = config
        .oauth()
        .context("OAuth client credentials are required to start the dashboard")?;
    let oauth = super::oauth_config(&oauth_section);
    let install_url = sitedeck_oauth::build_authorization_url(&oauth);
    let exchanger = HttpTokenExchanger::new(oauth)?;

    // ── Site API ────────────────────────────────────────────────────────

    let api = config.api();
    let sites = HttpSiteApi::builder()
        .base_url(&api.base_url)
        .timeout(Duration::from_secs(api.timeout_secs))
        .build()?;

    // ── Server ──────────────────────────────────────────────────────────

    let server_config = ServerConfig::new()
        .with_bind_address(addr)
        .with_request_logging(server_section.request_logging)
        .with_gateway(config.gateway())
        .with_install_url(install_url);

    let state = AppState::new(server_config, Arc::new(exchanger), Arc::new(sites))?;
    let server = Server::from_state(state);

    info!(%addr, api = %api.base_url, "dashboard configured");
    println!("sitedeck listening on http://{}", addr);
    println!("Press Ctrl+C to stop");

    server.run().await?;
    Ok(())
}

/// Accept either `host:port` or a bare host, keeping the configured port.
fn resolve_bind(bind: &str, configured: &SocketAddr) -> Result<SocketAddr> {
    if let Ok(addr) = bind.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let ip = bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", bind))?;
    Ok(SocketAddr::new(ip, configured.port()))
}
