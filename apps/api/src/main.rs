mod coding;
mod config;
mod errors;
mod history;
mod interview;
mod llm_client;
mod models;
mod report;
mod roadmap;
mod routes;
mod session;
mod setup;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::coding::questions::LlmQuestionGenerator;
use crate::config::Config;
use crate::history::store::JsonFileStore;
use crate::history::HistoryLog;
use crate::interview::chat::LlmInterviewer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PrepCoach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_api_key.clone(), config.llm_api_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize history log over the local key-value store
    let store = JsonFileStore::new(config.data_dir.clone());
    info!("History store at {}", store.dir().display());
    let history = HistoryLog::new(Arc::new(store));

    let state = AppState {
        config: config.clone(),
        interviewer: Arc::new(LlmInterviewer(llm.clone())),
        questions: Arc::new(LlmQuestionGenerator(llm.clone())),
        llm,
        history,
        sessions: SessionRegistry::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
