mod clock;
mod config;
mod consent;
mod documents;
mod errors;
mod export;
mod llm_client;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::export::default_page_layout;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Consent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.api_key.clone(),
        &config.llm_base_url,
        config.llm_timeout,
    )?;
    info!(
        base_url = %config.llm_base_url,
        timeout_secs = config.llm_timeout.as_secs(),
        "LLM client initialized (models: {}, {})",
        llm_client::REASONING_MODEL,
        llm_client::CHAT_MODEL
    );

    let page_layout = default_page_layout();
    info!(
        "Export layout: {} columns, {} lines per page, scratch dir {}",
        page_layout.page_width_chars,
        page_layout.lines_per_page(),
        config.export_dir.display()
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sessions = SessionRegistry::new(clock.clone(), config.session_idle_ttl);
    info!(
        idle_ttl_secs = config.session_idle_ttl.as_secs(),
        "Session registry initialized"
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        sessions,
        config: config.clone(),
        clock,
        page_layout,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
