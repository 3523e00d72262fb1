// Ordering API Server Binary
//
// Entry point for the restaurant ordering API server.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ordering_api::{ApiServer, ApiServerConfig, ApiState};
use ordering_store_interface::InMemoryDataStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordering_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("ORDERING_API_PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8080);

    tracing::info!(port, "starting ordering API server");

    let store = Arc::new(InMemoryDataStore::new());
    let state = ApiState::new(store);
    ApiServer::new(ApiServerConfig::with_port(port), state)
        .serve()
        .await?;

    Ok(())
}
