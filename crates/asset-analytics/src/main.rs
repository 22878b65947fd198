//! Asset Analytics Service - tenant-scoped asset statistics
//!
//! Serves summary, distribution, value and monthly trend views over the
//! assets held by the inventory service.

use std::sync::Arc;

use asset_analytics::{
    start_server, AssetSource, Config, Result, ServerState, SharedState, SyntheticAssets,
};
use inventory_client::InventoryClient;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("asset_analytics=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Asset Analytics Service...");
    info!("Port: {}", config.port);
    info!("Inventory service: {}", config.inventory_service_url);
    info!("Upstream timeout: {:?}", config.upstream_timeout);
    info!("Cache TTL: {:?}", config.cache_ttl);

    let client =
        InventoryClient::with_timeout(&config.inventory_service_url, config.upstream_timeout)?;
    let source = AssetSource::new(
        Arc::new(client),
        Arc::new(SyntheticAssets::from_entropy()),
        config.cache_ttl,
        config.upstream_timeout,
    );

    let state: SharedState = Arc::new(ServerState::new(source));

    // Start HTTP server (blocking until shutdown)
    start_server(state, config.port).await?;

    info!("Shutting down");
    Ok(())
}
