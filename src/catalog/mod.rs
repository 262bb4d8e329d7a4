use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{CrewMember, MovieId, MovieRecord};

/// Errors raised while loading a catalog snapshot
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog snapshot contains no usable movie rows")]
    NoUsableRows,
}

/// Nested `{"name": ...}` entry as exported by TMDB dumps
#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

/// Raw movie row before validation; every field may be absent
#[derive(Debug, Deserialize)]
struct RawMovieRow {
    id: Option<MovieId>,
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    genres: Vec<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct RawCrewEntry {
    name: String,
    #[serde(default)]
    job: String,
}

/// Raw credits row, keyed by the same movie id as the movies file
#[derive(Debug, Deserialize)]
struct RawCreditsRow {
    id: Option<MovieId>,
    #[serde(default)]
    cast: Vec<NamedEntry>,
    #[serde(default)]
    crew: Vec<RawCrewEntry>,
}

/// Loads and joins the movies and credits snapshot files
///
/// Mirrors the original two-file TMDB export: movies carry title, overview
/// and genres; credits carry cast and crew for the same ids. Malformed rows
/// are reported and skipped; loading fails only when nothing usable remains.
pub fn load(movies_path: &Path, credits_path: &Path) -> Result<Vec<MovieRecord>, CatalogError> {
    let movies: Vec<RawMovieRow> = read_json(movies_path)?;
    let credits: Vec<RawCreditsRow> = read_json(credits_path)?;
    join(movies, credits)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Joins raw rows into validated records
///
/// A movie without a credits row degrades to empty cast/crew. Rows missing
/// an id or title are malformed: each is logged with a warning, never
/// silently dropped.
fn join(
    movies: Vec<RawMovieRow>,
    credits: Vec<RawCreditsRow>,
) -> Result<Vec<MovieRecord>, CatalogError> {
    let mut credits_by_id: HashMap<MovieId, RawCreditsRow> = HashMap::with_capacity(credits.len());
    for row in credits {
        match row.id {
            Some(id) => {
                credits_by_id.insert(id, row);
            }
            None => tracing::warn!("Skipping credits row without a movie id"),
        }
    }

    let total = movies.len();
    let mut skipped = 0usize;
    let mut records = Vec::with_capacity(total);
    for row in movies {
        let (id, title) = match (row.id, row.title) {
            (Some(id), Some(title)) if !title.trim().is_empty() => (id, title),
            (id, title) => {
                skipped += 1;
                tracing::warn!(?id, ?title, "Skipping malformed movie row");
                continue;
            }
        };

        let (cast, crew) = match credits_by_id.remove(&id) {
            Some(row) => (
                row.cast.into_iter().map(|c| c.name).collect(),
                row.crew
                    .into_iter()
                    .map(|c| CrewMember {
                        name: c.name,
                        job: c.job,
                    })
                    .collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        records.push(MovieRecord {
            id,
            title,
            overview: row.overview.unwrap_or_default(),
            genres: row.genres.into_iter().map(|g| g.name).collect(),
            cast,
            crew,
        });
    }

    if records.is_empty() {
        return Err(CatalogError::NoUsableRows);
    }

    tracing::info!(
        loaded = records.len(),
        skipped,
        "Catalog snapshot loaded"
    );
    Ok(records)
}
