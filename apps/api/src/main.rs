mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::recovery::{LlmTextRecovery, NoopTextRecovery, TextRecovery};
use crate::llm_client::LlmClient;
use crate::matching::dictionary::SkillDictionary;
use crate::matching::summary::{LlmSummary, NoopSummary, SummaryService};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Compile the skill dictionary up front so the first request doesn't pay for it
    let dictionary = SkillDictionary::global();
    info!("Skill dictionary loaded ({} skills)", dictionary.len());

    let (recovery, summarizer) = build_ai_services(&config)?;

    let state = AppState {
        config: config.clone(),
        recovery,
        summarizer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LLM-backed recovery and summaries when `AI_API_URL` is set, no-ops otherwise.
fn build_ai_services(
    config: &Config,
) -> Result<(Arc<dyn TextRecovery>, Arc<dyn SummaryService>)> {
    let Some(api_url) = config.ai_api_url.clone() else {
        info!("AI_API_URL not set; text recovery and summaries disabled");
        return Ok((Arc::new(NoopTextRecovery), Arc::new(NoopSummary)));
    };

    let llm = LlmClient::new(api_url.clone(), config.ai_api_key.clone(), config.ai_timeout())?
        .with_max_retries(config.ai_max_retries);
    info!(
        "LLM client initialized ({api_url}; extract model: {}, summary model: {})",
        config.ai_extract_model, config.ai_summary_model
    );

    Ok((
        Arc::new(LlmTextRecovery::new(llm.clone(), config.ai_extract_model.clone())),
        Arc::new(LlmSummary::new(llm, config.ai_summary_model.clone())),
    ))
}
