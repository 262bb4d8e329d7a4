use std::collections::{BTreeMap, BTreeSet};

use crate::models::MovieId;

use super::error::{EngineError, EngineResult};
use super::features::ContentTag;

/// Fitted term-weighting model: vocabulary plus per-term IDF weights
///
/// Built once from the full content-tag corpus at engine initialization and
/// shared read-only by every subsequent transform. There is deliberately no
/// global instance; the model is an explicit value passed where needed.
#[derive(Debug, Clone)]
pub struct VectorSpaceModel {
    /// Term to column index, lexicographically ordered for reproducibility
    vocabulary: BTreeMap<String, usize>,
    /// Inverse-document-frequency weight per column
    idf: Vec<f64>,
    corpus_size: usize,
}

/// Sparse TF-IDF vector for one movie
///
/// Weights are `(column, weight)` pairs sorted by column; the L2 norm is
/// precomputed so cosine similarity never recomputes it per query.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieVector {
    pub movie_id: MovieId,
    weights: Vec<(usize, f64)>,
    norm: f64,
}

impl MovieVector {
    /// Dot product over the sorted sparse representations
    pub fn dot(&self, other: &MovieVector) -> f64 {
        let mut sum = 0.0;
        let mut rhs = other.weights.iter().peekable();
        for &(col, w) in &self.weights {
            while let Some(&&(other_col, _)) = rhs.peek() {
                if other_col < col {
                    rhs.next();
                } else {
                    break;
                }
            }
            if let Some(&&(other_col, other_w)) = rhs.peek() {
                if other_col == col {
                    sum += w * other_w;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// True when every weight is zero (empty or all-OOV document)
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }
}

impl VectorSpaceModel {
    /// Fits vocabulary and IDF weights over the full tag corpus
    ///
    /// Term weight for term t in document d is
    /// `(count(t, d) / len(d)) * (ln((1 + N) / (1 + df(t))) + 1)`. The
    /// smoothed IDF keeps every in-vocabulary weight strictly positive, so
    /// cosine scores stay in [0, 1] and a term shared by most documents
    /// still carries (dampened) signal.
    pub fn fit(tags: &[ContentTag]) -> EngineResult<Self> {
        if tags.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tag in tags {
            let distinct: BTreeSet<&str> = tag.tokens.iter().map(String::as_str).collect();
            for term in distinct {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(EngineError::DegenerateVocabulary);
        }

        let corpus_size = tags.len();
        let n = corpus_size as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Ok(Self {
            vocabulary,
            idf,
            corpus_size,
        })
    }

    /// Vectorizes every tag, preserving input order
    pub fn transform(&self, tags: &[ContentTag]) -> Vec<MovieVector> {
        tags.iter().map(|tag| self.vectorize(tag)).collect()
    }

    /// Vectorizes one document against the fitted vocabulary
    ///
    /// Out-of-vocabulary tokens contribute zero weight but still count
    /// toward document length, matching the fit-time definition of TF.
    pub fn vectorize(&self, tag: &ContentTag) -> MovieVector {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for token in &tag.tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }

        let length = tag.tokens.len() as f64;
        let mut weights = Vec::with_capacity(counts.len());
        for (column, count) in counts {
            let weight = (count as f64 / length) * self.idf[column];
            if weight > 0.0 {
                weights.push((column, weight));
            }
        }

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        MovieVector {
            movie_id: tag.movie_id,
            weights,
            norm,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    /// Column index for a term, if it was seen at fit time
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(movie_id: MovieId, tokens: &[&str]) -> ContentTag {
        ContentTag {
            movie_id,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        let err = VectorSpaceModel::fit(&[]).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCorpus));
    }

    #[test]
    fn test_fit_all_empty_documents_is_degenerate() {
        let tags = vec![tag(1, &[]), tag(2, &[])];
        let err = VectorSpaceModel::fit(&tags).unwrap_err();
        assert!(matches!(err, EngineError::DegenerateVocabulary));
    }

    #[test]
    fn test_vocabulary_columns_are_lexicographic() {
        let tags = vec![tag(1, &["zebra", "apple"]), tag(2, &["mango"])];
        let model = VectorSpaceModel::fit(&tags).unwrap();

        assert_eq!(model.vocabulary_size(), 3);
        assert_eq!(model.corpus_size(), 2);
        assert_eq!(model.column("apple"), Some(0));
        assert_eq!(model.column("mango"), Some(1));
        assert_eq!(model.column("zebra"), Some(2));
    }

    #[test]
    fn test_rare_term_outweighs_ubiquitous_term() {
        let tags = vec![
            tag(1, &["common", "rare"]),
            tag(2, &["common"]),
            tag(3, &["common"]),
        ];
        let model = VectorSpaceModel::fit(&tags).unwrap();
        let vectors = model.transform(&tags);

        let common_col = model.column("common").unwrap();
        let rare_col = model.column("rare").unwrap();
        let weight_of = |col: usize| {
            vectors[0]
                .weights
                .iter()
                .find(|&&(c, _)| c == col)
                .map(|&(_, w)| w)
                .unwrap()
        };

        assert!(weight_of(rare_col) > weight_of(common_col));
        assert!(weight_of(common_col) > 0.0);
    }

    #[test]
    fn test_out_of_vocabulary_tokens_are_ignored() {
        let fit_tags = vec![tag(1, &["space", "alien"]), tag(2, &["wedding"])];
        let model = VectorSpaceModel::fit(&fit_tags).unwrap();

        let vector = model.vectorize(&tag(3, &["unseen", "tokens", "only"]));
        assert!(vector.is_zero());
        assert_eq!(vector.norm(), 0.0);
    }

    #[test]
    fn test_empty_document_vectorizes_to_zero() {
        let fit_tags = vec![tag(1, &["space"]), tag(2, &["wedding"])];
        let model = VectorSpaceModel::fit(&fit_tags).unwrap();

        let vector = model.vectorize(&tag(3, &[]));
        assert!(vector.is_zero());
    }

    #[test]
    fn test_dot_product_of_disjoint_vectors_is_zero() {
        let tags = vec![tag(1, &["space", "ship"]), tag(2, &["wedding", "dinner"])];
        let model = VectorSpaceModel::fit(&tags).unwrap();
        let vectors = model.transform(&tags);

        assert_eq!(vectors[0].dot(&vectors[1]), 0.0);
    }

    #[test]
    fn test_shared_rare_term_yields_positive_dot_product() {
        let tags = vec![
            tag(1, &["space", "astronaut"]),
            tag(2, &["space", "alien"]),
            tag(3, &["wedding"]),
        ];
        let model = VectorSpaceModel::fit(&tags).unwrap();
        let vectors = model.transform(&tags);

        assert!(vectors[0].dot(&vectors[1]) > 0.0);
        assert_eq!(vectors[0].dot(&vectors[2]), 0.0);
    }

    #[test]
    fn test_fit_transform_is_deterministic() {
        let tags = vec![
            tag(1, &["space", "astronaut", "mission"]),
            tag(2, &["space", "alien", "invasion"]),
        ];

        let first = VectorSpaceModel::fit(&tags).unwrap().transform(&tags);
        let second = VectorSpaceModel::fit(&tags).unwrap().transform(&tags);
        assert_eq!(first, second);
    }
}
