// API Server Binary Entry Point
//
// Purpose: Load models once and start the Axum API server
// Usage: cargo run --bin api_server

use agri_oracle::utils::init_tracing;
use agri_oracle::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default log level: info for our crate, debug for HTTP tracing, warn for others
    init_tracing("agri_oracle=info,tower_http=debug,axum=debug,warn");

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env();
    config.log();

    // Load models, encoders and knowledge base (read-only afterwards)
    tracing::info!("Initializing application state...");
    let state = AppState::load(&config)?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
