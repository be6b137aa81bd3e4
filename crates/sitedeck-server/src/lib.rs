//! HTTP server and session gateway for the sitedeck dashboard.
//!
//! Every request passes through the gateway before routing. The gateway
//! decides whether the request continues, is redirected, or (on the OAuth
//! callback) establishes a session cookie first.
//!
//! # Features
//!
//! - Route classification with a configurable exclusion list
//! - Authorization-code exchange on the callback path
//! - `HttpOnly; Secure; SameSite=Strict` session cookie
//! - Dashboard and JSON API handlers backed by the site API
//! - Request logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sitedeck_server::{AppState, Server, ServerConfig};
//!
//! let state = AppState::new(ServerConfig::new(), Arc::new(exchanger), Arc::new(site_api))?;
//! Server::from_state(state).run().await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod routes;
pub mod state;

pub use auth::SessionBearer;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use gateway::{Gateway, GatewayAction, RouteCategory, gateway_middleware};
pub use logging::request_logging_middleware;
pub use state::AppState;

use std::net::SocketAddr;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// The sitedeck HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let config = self.state.config();

        Router::new()
            .merge(routes::health_routes())
            .merge(routes::login_routes(&config.gateway.login_path))
            .merge(routes::dashboard_routes(&config.gateway.landing_path))
            .merge(routes::api_routes())
            // Registered before the gateway layer so unknown paths are gated too
            .fallback(routes::not_found)
            .layer(DefaultBodyLimit::max(config.max_body_size))
            // Gateway (inner layer, runs after request logging)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                gateway::gateway_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                logging::request_logging_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        self.serve(listener, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let router = self.router();

        if let Ok(addr) = listener.local_addr() {
            info!("Starting server on {}", addr);
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}
