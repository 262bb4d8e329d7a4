use thiserror::Error;

use crate::models::MovieId;

/// Error types for the recommendation engine
///
/// Build-time variants (`MalformedRecord`, `EmptyCorpus`, `DegenerateVocabulary`)
/// abort initialization entirely: a partially built engine is never returned.
/// Query-time variants are recoverable and never corrupt engine state.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Cannot build an engine from an empty catalog")]
    EmptyCorpus,

    #[error("Every document in the catalog tokenized to nothing; no vocabulary to fit")]
    DegenerateVocabulary,

    #[error("No movie titled '{0}' in the catalog; check the spelling or pick a title from /movies")]
    UnknownTitle(String),

    #[error("Movie id {0} is not part of this catalog snapshot")]
    UnknownMovie(MovieId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
