//! Proxy server binary
//!
//! Run with: cargo run --bin rag-proxy-server

use rag_proxy::{config::ProxyConfig, server::ProxyServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_proxy=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (config file + env overrides, resolved once)
    let config = ProxyConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Document service: {}", config.remote.document_url);
    tracing::info!("  - Agent service: {}", config.remote.agent_url);
    tracing::info!(
        "  - API key: {}",
        if config.remote.api_key.is_some() {
            "configured"
        } else {
            "MISSING"
        }
    );
    tracing::info!("  - Remote timeout: {}s", config.remote.timeout_secs);

    let server = ProxyServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  GET    /api/rag?ragId=<id> - List documents");
    println!("  POST   /api/rag            - Upload, parse, and train");
    println!("  DELETE /api/rag            - Delete documents");
    println!("  POST   /api/agent          - Cost estimate");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
