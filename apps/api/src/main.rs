mod config;
mod errors;
mod gateway;
mod interview;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::Gateway;
use crate::interview::store::SessionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Life Architect API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model gateway (one per process)
    let gateway = Gateway::from_credential(config.anthropic_api_key.clone());
    if gateway.is_configured() {
        info!("Model gateway initialized (model: {})", llm_client::MODEL);
    } else {
        warn!(
            "ANTHROPIC_API_KEY is not set: follow-up questions will use the fallback \
             and report synthesis will fail"
        );
    }

    info!(
        "Interview cap: {} questions (+{} per continue)",
        config.question_cap, config.cap_increment
    );

    // Build app state
    let state = AppState {
        gateway,
        sessions: SessionStore::new(),
        config: config.clone(),
    };

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
