/// TMDB metadata provider
///
/// Fetches display metadata (poster, overview, rating) from The Movie
/// Database API, keyed by the catalog's TMDB movie ids.
use chrono::Utc;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId},
    services::providers::MetadataProvider,
};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Raw response from GET /movie/{id}
#[derive(Debug, Deserialize)]
struct ApiMovieDetails {
    title: String,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

/// Expands a TMDB poster path ("/abc.jpg") to a full image URL
fn poster_url(poster_path: Option<String>) -> Option<String> {
    poster_path.map(|path| format!("{}{}", POSTER_BASE_URL, path))
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "TMDB has no movie with id {}",
                movie_id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let details: ApiMovieDetails = response.json().await?;

        tracing::debug!(
            movie_id,
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(MovieDetails {
            movie_id,
            title: details.title,
            overview: details.overview,
            poster_url: poster_url(details.poster_path),
            vote_average: details.vote_average,
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
