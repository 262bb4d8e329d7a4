use std::sync::Arc;

use crate::{
    engine::RecommendationEngine,
    error::AppResult,
    models::EnrichedRecommendation,
    services::providers::MetadataProvider,
};

/// Answers a recommendation query and optionally joins display metadata
///
/// The engine query itself is synchronous and infallible against external
/// services; only the optional enrichment touches the network. Enrichment
/// fans out one provider call per result and tolerates individual failures:
/// a movie whose lookup fails keeps its slot with `details: None` rather
/// than failing the whole response.
pub async fn recommend(
    engine: &RecommendationEngine,
    provider: Arc<dyn MetadataProvider>,
    title: &str,
    k: usize,
    include_details: bool,
) -> AppResult<Vec<EnrichedRecommendation>> {
    let recommendations = engine.recommend(title, k)?;

    if !include_details {
        return Ok(recommendations
            .into_iter()
            .map(|rec| EnrichedRecommendation::from_recommendation(rec, None))
            .collect());
    }

    let mut tasks = Vec::with_capacity(recommendations.len());
    for rec in &recommendations {
        let provider = Arc::clone(&provider);
        let movie_id = rec.movie_id;
        tasks.push(tokio::spawn(
            async move { provider.fetch_details(movie_id).await },
        ));
    }

    let mut enriched = Vec::with_capacity(recommendations.len());
    for (rec, task) in recommendations.into_iter().zip(tasks) {
        let details = match task.await {
            Ok(Ok(details)) => Some(details),
            Ok(Err(e)) => {
                tracing::warn!(
                    movie_id = rec.movie_id,
                    provider = provider.name(),
                    error = %e,
                    "Details fetch failed; returning recommendation without details"
                );
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Details task join error");
                None
            }
        };
        enriched.push(EnrichedRecommendation::from_recommendation(rec, details));
    }

    Ok(enriched)
}
