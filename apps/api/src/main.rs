mod config;
mod errors;
mod generation;
mod ingest;
mod llm_client;
mod models;
mod pipeline;
mod render;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RunMode};
use crate::llm_client::LlmClient;
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Input and output directory tree
    config.ensure_dirs()?;
    info!(
        "Directories ready (input: {}, output: {})",
        config.input_dir.display(),
        config.output_dir.display()
    );

    // One LLM client per stage
    let extractor = LlmClient::new(config.anthropic_api_key.clone(), config.extraction_model.clone())?;
    info!("Extraction client initialized (model: {})", extractor.model());
    let tailor = LlmClient::new(config.anthropic_api_key.clone(), config.tailoring_model.clone())?;
    info!("Tailoring client initialized (model: {})", tailor.model());

    // Build app state
    let state = AppState {
        config: Arc::new(config.clone()),
        extractor: Arc::new(extractor),
        tailor: Arc::new(tailor),
        renderer: Arc::new(PdfRenderer),
    };

    if config.mode == RunMode::Cli {
        info!("Running in CLI mode");
        if pipeline::run_cli(&state).await?.is_some() {
            info!("Pipeline completed successfully");
        }
        return Ok(());
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
