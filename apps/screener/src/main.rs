mod analysis;
mod archive;
mod candidates;
mod config;
mod db;
mod errors;
mod extraction;
mod hr;
mod llm_client;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ResilientResumeAnalyzer;
use crate::archive::S3ResumeArchive;
use crate::config::Config;
use crate::db::connect_candidate_store;
use crate::hr::HrClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::profiles::ProfileVerifier;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let store = connect_candidate_store(&config.database_url).await?;

    let archive = S3ResumeArchive::from_config(&config).await;
    info!("S3 archive initialized (bucket: {})", config.s3_bucket);

    let llm = match config.anthropic_api_key.clone() {
        Some(key) => {
            let client = LlmClient::new(key)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; resume analysis uses keyword fallback");
            None
        }
    };
    let analyzer = Arc::new(ResilientResumeAnalyzer::from_llm(llm.clone()));

    let state = AppState {
        store: Arc::new(store),
        archive: Arc::new(archive),
        analyzer,
        llm,
        profiles: ProfileVerifier::new(config.github_api_url.clone())?,
        hr: HrClient::new()?,
        config: config.clone(),
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
