use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the movies snapshot file (JSON)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Path to the credits snapshot file (JSON)
    #[serde(default = "default_credits_path")]
    pub credits_path: PathBuf,

    /// TMDB API key for metadata enrichment
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Precompute the full similarity matrix at startup. Trades O(N²)
    /// memory for O(1) query-time pair lookups; results are identical
    /// either way.
    #[serde(default = "default_precompute_similarity")]
    pub precompute_similarity: bool,
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_credits_path() -> PathBuf {
    PathBuf::from("data/credits.json")
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_precompute_similarity() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
