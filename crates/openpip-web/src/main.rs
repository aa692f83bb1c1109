//! openPIP Web Server
//!
//! Run with: cargo run -p openpip-web --bin openpip-web

use std::sync::Arc;

use openpip_db::Database;
use openpip_web::{config::Config, logging, router::build_router, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    logging::init(&config.logging)?;

    info!("Starting openPIP protein API...");

    let db = Database::connect(&config.database.url, config.database.max_connections).await?;
    db.initialize().await?;
    let stats = db.stats().await?;
    info!(proteins = stats.proteins, "Database ready");

    let state = AppState::new(Arc::new(db), config.api.clone());
    let app = build_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Server listening on http://{}{}/proteins/",
        addr,
        config.api.normalized_base_path()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
