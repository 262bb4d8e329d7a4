use serde::{Deserialize, Serialize};

/// Catalog-wide movie identifier (TMDB numeric id)
pub type MovieId = u32;

/// A crew credit attached to a movie
///
/// Only the director is used for similarity, but the full crew list is kept
/// so the record mirrors the catalog snapshot faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

/// A single movie from the catalog snapshot
///
/// Built once at catalog load and never mutated afterwards. Optional fields
/// from the raw data default to empty contributions rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Unique, immutable identifier
    pub id: MovieId,
    pub title: String,
    /// Plot summary; may be empty
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Cast names in billing order
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl MovieRecord {
    /// Names of everyone credited as director, in crew order
    pub fn directors(&self) -> impl Iterator<Item = &str> {
        self.crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
    }
}
