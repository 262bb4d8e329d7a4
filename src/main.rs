use std::sync::Arc;

use reelrec_api::api::{create_router, AppState};
use reelrec_api::catalog;
use reelrec_api::config::Config;
use reelrec_api::engine::{EngineOptions, RecommendationEngine};
use reelrec_api::services::providers::TmdbProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // One-shot batch build: load the snapshot, fit the vector space, index
    // similarities. Everything the handlers touch is immutable afterwards.
    let records = catalog::load(&config.movies_path, &config.credits_path)?;
    let engine = RecommendationEngine::initialize(
        &records,
        EngineOptions {
            precompute: config.precompute_similarity,
        },
    )?;

    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let state = AppState::new(engine, provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
