// wayfarer - Travel-assistant orchestration over a generative text backend
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use wayfarer::backend::{HttpBackend, InferenceBackend};
use wayfarer::cli::Args;
use wayfarer::config::AppConfig;
use wayfarer::orchestrator::RequestOrchestrator;
use wayfarer::server::create_router;
use wayfarer::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting wayfarer v{}", env!("CARGO_PKG_VERSION"));

    if config.backend.api_key.is_empty() {
        warn!("No backend API key configured; set WAYFARER_BACKEND__API_KEY");
    }

    // Phase 3: Build backend client and orchestration state
    let backend: Arc<dyn InferenceBackend> = Arc::new(HttpBackend::new(&config.backend)?);
    let orchestrator = Arc::new(RequestOrchestrator::from_config(&config, backend.clone()));
    info!(
        "Using models {} (fallback {}) at {}",
        config.backend.primary_model, config.backend.fallback_model, config.backend.api_base_url
    );

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), orchestrator, backend);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
