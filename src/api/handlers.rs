use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::error::AppResult;
use crate::models::{EnrichedRecommendation, MovieDetails, MovieId};
use crate::services::recommendations;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub include_details: bool,
}

fn default_k() -> usize {
    5
}

/// Catalog entry as shown in the title selector
#[derive(Debug, Serialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List all catalog movies (id + title), ascending by id
pub async fn get_movies(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    let movies = state
        .engine
        .movies()
        .into_iter()
        .map(|(id, title)| MovieSummary { id, title })
        .collect();
    Json(movies)
}

/// Recommend movies similar to the requested title
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<EnrichedRecommendation>>> {
    let results = recommendations::recommend(
        &state.engine,
        Arc::clone(&state.provider),
        &request.title,
        request.k,
        request.include_details,
    )
    .await?;
    Ok(Json(results))
}

/// Enrichment passthrough: display metadata for one catalog movie
pub async fn get_movie_details(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<MovieDetails>> {
    if !state.engine.contains(id) {
        return Err(EngineError::UnknownMovie(id).into());
    }
    let details = state.provider.fetch_details(id).await?;
    Ok(Json(details))
}
