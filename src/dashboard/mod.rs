//! Web dashboard over the recorded history.
//!
//! ```text
//! GET  /               tabbed HTML page
//! GET  /api/table      flat table
//! GET  /api/dashboard  table + chart views
//! POST /api/refresh    fetch and record today's figures
//! ```
//!
//! The page re-reads `/api/dashboard` after every action, so each view is
//! always derived from what is currently stored.

mod error;
mod routes;

pub use error::AppError;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AsyncSectorTracker;

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl DashboardConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Create the axum router.
pub fn create_router(tracker: AsyncSectorTracker) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/table", get(routes::get_table))
        .route("/api/dashboard", get(routes::get_dashboard))
        .route("/api/refresh", post(routes::refresh))
        .layer(CorsLayer::permissive())
        .with_state(tracker)
}

/// Serve the dashboard until Ctrl-C.
pub async fn run_server(tracker: AsyncSectorTracker, config: DashboardConfig) -> std::io::Result<()> {
    let addr: SocketAddr = config
        .addr()
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Dashboard listening on http://{}", addr);

    axum::serve(listener, create_router(tracker))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
