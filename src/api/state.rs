use std::sync::Arc;

use crate::engine::RecommendationEngine;
use crate::services::providers::MetadataProvider;

/// Shared application state
///
/// The engine is immutable once initialized, so handlers share it through a
/// plain `Arc` with no interior locking; concurrent queries are safe by
/// construction. Rebuilding for a new catalog snapshot means constructing a
/// new state, never mutating this one.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub provider: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            engine: Arc::new(engine),
            provider,
        }
    }
}
