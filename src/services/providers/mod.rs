//! Metadata provider abstraction
//!
//! Pluggable architecture for display-metadata sources (TMDB today, any
//! other movie-database API tomorrow). The recommendation engine never
//! calls a provider; enrichment is strictly a presentation-layer concern
//! joined in by the service layer after the engine has answered.

use crate::{
    error::AppResult,
    models::{MovieDetails, MovieId},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for display-metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch poster, summary, and rating metadata for one movie id
    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
