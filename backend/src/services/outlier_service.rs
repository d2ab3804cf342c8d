use crate::error::CatalogError;
use crate::models::{FilterCriteria, OutlierResult};
use crate::services::assembler::assemble;
use crate::services::catalog::CatalogQueryAdapter;
use crate::services::channel_cache::ChannelCache;
use crate::services::clock::Clock;
use crate::services::filter;
use crate::services::scoring::{OutlierScorer, ScoringWeights};
use crate::services::youtube_client::CatalogProvider;
use log::info;
use std::sync::Arc;

/// Search → join → filter → score → rank.
pub struct OutlierEngine {
    adapter: CatalogQueryAdapter,
    scorer: OutlierScorer,
    clock: Arc<dyn Clock>,
}

impl OutlierEngine {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        cache: Arc<ChannelCache>,
        clock: Arc<dyn Clock>,
        weights: ScoringWeights,
    ) -> Self {
        OutlierEngine {
            adapter: CatalogQueryAdapter::new(provider, cache),
            scorer: OutlierScorer::new(weights),
            clock,
        }
    }

    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<OutlierResult>, CatalogError> {
        info!("Searching YouTube for: {}", criteria.keywords);

        let candidates = self.adapter.fetch_candidates(criteria).await?;
        let filtered = filter::apply(candidates, criteria);
        info!(
            "{} candidates passed filters, {} removed",
            filtered.kept.len(),
            filtered.removed.len()
        );

        let now = self.clock.now();
        let scored = filtered
            .kept
            .into_iter()
            .map(|candidate| self.scorer.score(candidate, now))
            .collect();

        let results = assemble(scored, criteria.max_results);
        info!("Search success. Results: {}", results.len());
        Ok(results)
    }
}
