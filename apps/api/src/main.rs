mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod matching;
mod models;
mod preferences;
mod repository;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::matching::requester::MatchRequester;
use crate::repository::PgRepository;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize the scoring oracle
    let llm = LlmClient::new(config.llm.clone())?;
    info!(
        "LLM client initialized (model: {}, max_tokens: {}, temperature: {})",
        llm.model(),
        config.llm.max_tokens,
        config.llm.temperature
    );

    let state = AppState {
        repo: Arc::new(PgRepository::new(db)),
        requester: MatchRequester::new(Arc::new(llm)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
