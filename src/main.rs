mod backend;
mod config;
mod error;
mod orchestrator;
mod report;
mod routes;
mod server;
mod state;
mod validate;

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use config::{AnalyzerConfig, CliArgs, CONNECT_TIMEOUT_SECS};
use orchestrator::Orchestrator;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitelens=info,tower_http=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    info!("Starting sitelens v{}", env!("CARGO_PKG_VERSION"));

    let config = AnalyzerConfig::from_args(args);
    let port = config.port;
    info!("Engine endpoint: {}", config.engine_url);
    info!(
        "PageSpeed API key: {}",
        if config.pagespeed_api_key.is_some() {
            "configured"
        } else {
            "absent (unauthenticated, rate-limited)"
        }
    );
    info!("Local capture: {}", config.local_capture);

    // Per-attempt deadlines live in the orchestrator; the client only
    // bounds connection establishment.
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;

    let orchestrator = Orchestrator::from_config(&config, http_client);
    let state = Arc::new(AppState::new(config, orchestrator));

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Sitelens listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sitelens shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    info!("Received shutdown signal");
}
