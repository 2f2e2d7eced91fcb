//! Duplicate-detection service for the serving path.

use std::sync::Arc;

use tracing::debug;

use super::traits::{Embedder, Judge, Result, SearchIndex};
use super::types::{CompilationMatch, SearchHit};

/// Minimum relevance score for a hit to reach the adjudicator.
pub const RELEVANCE_THRESHOLD: f64 = 0.75;

/// Serving-path pipeline: embed the query, retrieve nearest neighbors,
/// filter by relevance, adjudicate the survivors.
pub struct DedupService {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SearchIndex>,
    judge: Arc<dyn Judge>,
}

impl DedupService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SearchIndex>,
        judge: Arc<dyn Judge>,
    ) -> Self {
        Self {
            embedder,
            index,
            judge,
        }
    }

    /// Classify a free-text bug description against the index.
    ///
    /// The caller must reject empty queries before calling; embedding an
    /// empty string is an error. Returns an empty list when nothing
    /// scores above [`RELEVANCE_THRESHOLD`]; the adjudicator is never
    /// consulted in that case.
    pub async fn find_duplicates(&self, query: &str) -> Result<Vec<CompilationMatch>> {
        let vector = self.embedder.embed(query).await?;
        let hits = self.index.query_similar(&vector).await?;

        let relevant: Vec<SearchHit> = hits
            .into_iter()
            .filter(|hit| hit.score > RELEVANCE_THRESHOLD)
            .collect();

        if relevant.is_empty() {
            debug!("No relevant matches for query: {}", query);
            return Ok(vec![]);
        }

        self.judge.adjudicate(query, &relevant).await
    }
}
