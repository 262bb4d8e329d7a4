pub mod error;
pub mod features;
pub mod similarity;
pub mod tfidf;

use std::collections::HashMap;
use std::time::Instant;

use crate::models::{MovieId, MovieRecord, Recommendation};

pub use error::{EngineError, EngineResult};
pub use features::ContentTag;
pub use similarity::SimilarityIndex;
pub use tfidf::{MovieVector, VectorSpaceModel};

/// Build-time options for the engine
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Eagerly compute the full N×N similarity matrix (O(N²) memory,
    /// O(1) pair lookups) instead of computing rows per query (O(N) time,
    /// no matrix). Results are identical either way.
    pub precompute: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { precompute: true }
    }
}

/// Content-based recommendation engine over one catalog snapshot
///
/// Built once by [`RecommendationEngine::initialize`]; every structure is
/// immutable afterwards, so a shared reference can serve queries from any
/// number of concurrent callers without locking. Rebuilding for a new
/// snapshot means constructing a new engine, never mutating this one.
#[derive(Debug)]
pub struct RecommendationEngine {
    /// id → display title
    titles: HashMap<MovieId, String>,
    /// lower-cased title → movie id; duplicate titles resolve to the lowest
    /// id so lookup stays deterministic
    title_index: HashMap<String, MovieId>,
    model: VectorSpaceModel,
    index: SimilarityIndex,
}

impl RecommendationEngine {
    /// Runs the full batch pass: feature building, TF-IDF fit/transform,
    /// similarity index construction
    ///
    /// Fatal build errors (`EmptyCorpus`, `DegenerateVocabulary`,
    /// `MalformedRecord`) abort initialization; no partial engine escapes.
    pub fn initialize(records: &[MovieRecord], options: EngineOptions) -> EngineResult<Self> {
        let started = Instant::now();

        let tags = features::build(records)?;
        let model = VectorSpaceModel::fit(&tags)?;
        let vectors = model.transform(&tags);
        let index = SimilarityIndex::build(vectors, options.precompute);

        let mut titles = HashMap::with_capacity(records.len());
        let mut title_index: HashMap<String, MovieId> = HashMap::with_capacity(records.len());
        for record in records {
            titles.insert(record.id, record.title.clone());
            title_index
                .entry(record.title.to_lowercase())
                .and_modify(|existing| {
                    if record.id < *existing {
                        *existing = record.id;
                    }
                })
                .or_insert(record.id);
        }

        tracing::info!(
            movies = model.corpus_size(),
            vocabulary = model.vocabulary_size(),
            precompute = options.precompute,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recommendation engine initialized"
        );

        Ok(Self {
            titles,
            title_index,
            model,
            index,
        })
    }

    /// Number of movies in the snapshot
    pub fn movie_count(&self) -> usize {
        self.index.len()
    }

    /// Vocabulary size of the fitted vector space
    pub fn vocabulary_size(&self) -> usize {
        self.model.vocabulary_size()
    }

    /// All movies in the snapshot as `(id, title)`, ascending by id
    pub fn movies(&self) -> Vec<(MovieId, String)> {
        let mut movies: Vec<(MovieId, String)> = self
            .titles
            .iter()
            .map(|(&id, title)| (id, title.clone()))
            .collect();
        movies.sort_by_key(|&(id, _)| id);
        movies
    }

    /// True when the id belongs to this snapshot
    pub fn contains(&self, id: MovieId) -> bool {
        self.index.contains(id)
    }

    /// Case-insensitive exact title lookup
    pub fn resolve_title(&self, title: &str) -> EngineResult<MovieId> {
        self.title_index
            .get(&title.to_lowercase())
            .copied()
            .ok_or_else(|| EngineError::UnknownTitle(title.to_string()))
    }

    /// Pairwise cosine similarity between two catalog movies
    pub fn similarity(&self, i: MovieId, j: MovieId) -> EngineResult<f64> {
        self.index.similarity(i, j)
    }

    /// Top-k movies most similar to the given title
    ///
    /// Pure function of `(self, title, k)`: no hidden state, identical
    /// arguments always yield identical output.
    pub fn recommend(&self, title: &str, k: usize) -> EngineResult<Vec<Recommendation>> {
        let movie_id = self.resolve_title(title)?;
        let neighbors = self.index.neighbors(movie_id, k)?;

        Ok(neighbors
            .into_iter()
            .filter_map(|(id, score)| {
                self.titles.get(&id).map(|title| Recommendation {
                    movie_id: id,
                    title: title.clone(),
                    score,
                })
            })
            .collect())
    }
}
