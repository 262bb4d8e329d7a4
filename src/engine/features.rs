use std::collections::HashSet;

use crate::models::{MovieId, MovieRecord};

use super::error::{EngineError, EngineResult};

/// Number of top-billed cast members contributing to the content tag
const TOP_CAST: usize = 3;

/// Tokenized "content tag" derived from one movie's text fields
///
/// Concatenation of normalized overview words, genre names, top-billed cast
/// names, and director name(s). Person and genre names are flattened into
/// single atomic tokens so "James Cameron" stays distinct from the overview
/// words "james" and "cameron".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTag {
    pub movie_id: MovieId,
    pub tokens: Vec<String>,
}

/// Builds one content tag per record, preserving input order
///
/// Total: no record is dropped. Missing or empty fields contribute nothing.
/// A duplicate id is the one malformed-record condition a typed record can
/// still exhibit, and it is rejected rather than silently shadowed.
pub fn build(records: &[MovieRecord]) -> EngineResult<Vec<ContentTag>> {
    let mut seen: HashSet<MovieId> = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            if !seen.insert(record.id) {
                return Err(EngineError::MalformedRecord(format!(
                    "duplicate movie id {} in catalog snapshot",
                    record.id
                )));
            }
            Ok(ContentTag {
                movie_id: record.id,
                tokens: tokenize(record),
            })
        })
        .collect()
}

fn tokenize(record: &MovieRecord) -> Vec<String> {
    let mut tokens: Vec<String> = record
        .overview
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect();

    tokens.extend(atomic_tokens(record.genres.iter().map(String::as_str)));
    tokens.extend(atomic_tokens(
        record.cast.iter().take(TOP_CAST).map(String::as_str),
    ));
    tokens.extend(atomic_tokens(record.directors()));

    tokens
}

/// Lower-cases and strips non-alphanumeric characters
///
/// Applied to a multi-word name this also removes internal whitespace,
/// which is exactly the flattening that keeps names atomic.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn atomic_tokens<'a>(names: impl Iterator<Item = &'a str> + 'a) -> impl Iterator<Item = String> + 'a {
    names.map(normalize).filter(|t| !t.is_empty())
}
