use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovieId;

/// One entry of a `recommend` result: similar movie plus its cosine score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// Cosine similarity to the query movie, in [0, 1]
    pub score: f64,
}

/// Display metadata fetched from the enrichment provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie_id: MovieId,
    pub title: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub vote_average: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

/// A recommendation joined with optional display metadata
///
/// `details` is `None` when enrichment was not requested or the provider
/// lookup for this id failed; a partial enrichment never fails the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
    pub details: Option<MovieDetails>,
}

impl EnrichedRecommendation {
    pub fn from_recommendation(rec: Recommendation, details: Option<MovieDetails>) -> Self {
        Self {
            movie_id: rec.movie_id,
            title: rec.title,
            score: rec.score,
            details,
        }
    }
}
