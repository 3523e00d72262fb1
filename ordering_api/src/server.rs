//! HTTP server wrapper around the router.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::routes::build_router;
use crate::state::ApiState;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind the listener on.
    pub bind_addr: SocketAddr,
}

impl ApiServerConfig {
    /// Bind on all interfaces at the given port.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        }
    }
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self::with_port(8080)
    }
}

/// The ordering API server.
pub struct ApiServer {
    config: ApiServerConfig,
    state: ApiState,
}

impl ApiServer {
    /// Create a server from config and shared state.
    pub fn new(config: ApiServerConfig, state: ApiState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(self) -> std::io::Result<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "ordering API listening");
        axum::serve(listener, app).await
    }
}
