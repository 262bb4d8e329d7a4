use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::MovieId;

use super::error::{EngineError, EngineResult};
use super::tfidf::MovieVector;

/// Cosine-similarity index over the catalog's movie vectors
///
/// Two interchangeable modes: an eagerly computed N×N matrix for O(1) pair
/// lookups at O(N²) memory, or on-demand row computation at O(N) per query.
/// Both produce identical results; the choice is a build-time option.
#[derive(Debug)]
pub struct SimilarityIndex {
    /// Row order mirrors catalog input order
    ids: Vec<MovieId>,
    row_of: HashMap<MovieId, usize>,
    vectors: Vec<MovieVector>,
    /// Row-major N×N scores; `None` in on-demand mode
    matrix: Option<Vec<f64>>,
}

/// Cosine similarity between two non-negative TF-IDF vectors
///
/// Zero-norm vectors (empty or all-OOV documents) score 0 against
/// everything instead of dividing by zero. The clamp absorbs
/// floating-point drift just above 1.0.
fn cosine(a: &MovieVector, b: &MovieVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    (a.dot(b) / (a.norm() * b.norm())).clamp(0.0, 1.0)
}

impl SimilarityIndex {
    pub fn build(vectors: Vec<MovieVector>, precompute: bool) -> Self {
        let ids: Vec<MovieId> = vectors.iter().map(|v| v.movie_id).collect();
        let row_of: HashMap<MovieId, usize> = ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row))
            .collect();

        let matrix = precompute.then(|| {
            let n = vectors.len();
            let mut scores = vec![0.0; n * n];
            for i in 0..n {
                scores[i * n + i] = 1.0;
                for j in (i + 1)..n {
                    let score = cosine(&vectors[i], &vectors[j]);
                    scores[i * n + j] = score;
                    scores[j * n + i] = score;
                }
            }
            scores
        });

        Self {
            ids,
            row_of,
            vectors,
            matrix,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.row_of.contains_key(&id)
    }

    fn row(&self, id: MovieId) -> EngineResult<usize> {
        self.row_of
            .get(&id)
            .copied()
            .ok_or(EngineError::UnknownMovie(id))
    }

    fn score_at(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 1.0;
        }
        match &self.matrix {
            Some(scores) => scores[i * self.ids.len() + j],
            None => cosine(&self.vectors[i], &self.vectors[j]),
        }
    }

    /// Pairwise cosine similarity; symmetric, diagonal 1.0
    pub fn similarity(&self, i: MovieId, j: MovieId) -> EngineResult<f64> {
        let row_i = self.row(i)?;
        let row_j = self.row(j)?;
        Ok(self.score_at(row_i, row_j))
    }

    /// Top-k neighbors of a movie, query movie excluded
    ///
    /// Sorted by descending score; ties break by ascending movie id so the
    /// ordering never depends on insertion order or hash iteration. When k
    /// exceeds N−1 every other movie is returned without error.
    pub fn neighbors(&self, id: MovieId, k: usize) -> EngineResult<Vec<(MovieId, f64)>> {
        if k == 0 {
            return Err(EngineError::InvalidArgument(
                "neighbor count k must be at least 1".to_string(),
            ));
        }
        let query_row = self.row(id)?;

        let mut scored: Vec<(MovieId, f64)> = (0..self.ids.len())
            .filter(|&row| row != query_row)
            .map(|row| (self.ids[row], self.score_at(query_row, row)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}
