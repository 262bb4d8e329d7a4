use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;

use reelrec_api::api::{create_router, AppState};
use reelrec_api::engine::{EngineOptions, RecommendationEngine};
use reelrec_api::error::{AppError, AppResult};
use reelrec_api::models::{CrewMember, MovieDetails, MovieId, MovieRecord};
use reelrec_api::services::providers::MetadataProvider;

/// In-process provider so tests never touch the network
struct StubProvider {
    fail: bool,
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        if self.fail {
            return Err(AppError::ExternalApi("provider down".to_string()));
        }
        Ok(MovieDetails {
            movie_id,
            title: format!("movie-{movie_id}"),
            overview: Some("an overview".to_string()),
            poster_url: Some(format!("https://image.example/{movie_id}.jpg")),
            vote_average: Some(7.2),
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn movie(id: MovieId, title: &str, overview: &str) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        overview: overview.to_string(),
        genres: vec!["Science Fiction".to_string()],
        cast: vec!["Some Actor".to_string()],
        crew: vec![CrewMember {
            name: "Some Director".to_string(),
            job: "Director".to_string(),
        }],
    }
}

fn test_catalog() -> Vec<MovieRecord> {
    vec![
        movie(1, "A", "space astronaut mission"),
        movie(2, "B", "space alien invasion"),
        movie(3, "C", "romantic wedding dinner"),
    ]
}

fn create_test_server(fail_provider: bool) -> TestServer {
    let engine =
        RecommendationEngine::initialize(&test_catalog(), EngineOptions::default()).unwrap();
    let state = AppState::new(engine, Arc::new(StubProvider { fail: fail_provider }));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(false);
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_movies_lists_catalog_sorted_by_id() {
    let server = create_test_server(false);

    let response = server.get("/movies").await;
    response.assert_status_ok();

    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0]["id"], 1);
    assert_eq!(movies[0]["title"], "A");
    assert_eq!(movies[2]["id"], 3);
}

#[tokio::test]
async fn test_recommendations_rank_lexical_overlap_first() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "A", "k": 2 }))
        .await;

    response.assert_status_ok();
    let recs: Vec<serde_json::Value> = response.json();
    assert_eq!(recs.len(), 2);
    // B shares "space" with A; C shares nothing.
    assert_eq!(recs[0]["title"], "B");
    assert!(recs.iter().all(|r| r["title"] != "A"));
    assert!(recs.iter().all(|r| r["details"].is_null()));
}

#[tokio::test]
async fn test_recommendations_title_lookup_is_case_insensitive() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "a", "k": 1 }))
        .await;

    response.assert_status_ok();
    let recs: Vec<serde_json::Value> = response.json();
    assert_eq!(recs.len(), 1);
}

#[tokio::test]
async fn test_recommendations_with_details() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "A", "k": 2, "include_details": true }))
        .await;

    response.assert_status_ok();
    let recs: Vec<serde_json::Value> = response.json();
    for rec in &recs {
        assert_eq!(rec["details"]["movie_id"], rec["movie_id"]);
        assert!(rec["details"]["poster_url"].is_string());
    }
}

#[tokio::test]
async fn test_provider_failure_degrades_to_null_details() {
    let server = create_test_server(true);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "A", "k": 2, "include_details": true }))
        .await;

    response.assert_status_ok();
    let recs: Vec<serde_json::Value> = response.json();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r["details"].is_null()));
}

#[tokio::test]
async fn test_unknown_title_is_404_with_actionable_message() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "Unknown Title", "k": 5 }))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Unknown Title"));
}

#[tokio::test]
async fn test_zero_k_is_400() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "A", "k": 0 }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_k_returns_all_other_movies() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "A", "k": 103 }))
        .await;

    response.assert_status_ok();
    let recs: Vec<serde_json::Value> = response.json();
    assert_eq!(recs.len(), 2);
}

#[tokio::test]
async fn test_k_defaults_to_five() {
    let server = create_test_server(false);

    let response = server
        .post("/recommendations")
        .json(&json!({ "title": "A" }))
        .await;

    // Only 2 other movies exist, so the default k=5 is silently capped.
    response.assert_status_ok();
    let recs: Vec<serde_json::Value> = response.json();
    assert_eq!(recs.len(), 2);
}

#[tokio::test]
async fn test_movie_details_endpoint() {
    let server = create_test_server(false);

    let response = server.get("/movies/2/details").await;
    response.assert_status_ok();

    let details: serde_json::Value = response.json();
    assert_eq!(details["movie_id"], 2);
    assert_eq!(details["title"], "movie-2");
}

#[tokio::test]
async fn test_movie_details_unknown_id_is_404() {
    let server = create_test_server(false);

    let response = server.get("/movies/999/details").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = create_test_server(false);

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    uuid::Uuid::parse_str(header.to_str().unwrap()).unwrap();
}
