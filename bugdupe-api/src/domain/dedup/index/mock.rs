//! Mock search index for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::dedup::traits::{Result, SearchIndex};
use crate::domain::dedup::types::{IndexRecord, SearchHit};

/// Mock index with configurable query hits and recorded upserts.
#[derive(Clone, Default)]
pub struct MockSearchIndex {
    hits: Vec<SearchHit>,
    reject_upserts: bool,
    serve_upserts_with_score: Option<f64>,
    upserts: Arc<Mutex<Vec<IndexRecord>>>,
    ensure_calls: Arc<AtomicUsize>,
    query_calls: Arc<AtomicUsize>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the hits returned by every query.
    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    /// Make every upsert report a non-2xx rejection (`false`).
    pub fn rejecting_upserts(mut self) -> Self {
        self.reject_upserts = true;
        self
    }

    /// Serve previously upserted records as query hits at a fixed score.
    pub fn serving_upserts_at(mut self, score: f64) -> Self {
        self.serve_upserts_with_score = Some(score);
        self
    }

    /// Records upserted so far, in order.
    pub fn upserted(&self) -> Vec<IndexRecord> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn ensure_calls(&self) -> usize {
        self.ensure_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn ensure_index(&self) -> Result<()> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn upsert(&self, record: &IndexRecord) -> Result<bool> {
        if self.reject_upserts {
            return Ok(false);
        }
        self.upserts.lock().unwrap().push(record.clone());
        Ok(true)
    }

    async fn query_similar(&self, _vector: &[f32]) -> Result<Vec<SearchHit>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);

        let mut hits = self.hits.clone();
        if let Some(score) = self.serve_upserts_with_score {
            hits.extend(self.upserts.lock().unwrap().iter().map(|record| SearchHit {
                score,
                id: record.id.clone(),
                title: record.title.clone(),
                content: record.content.clone(),
                category: record.category.clone(),
            }));
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, score: f64) -> SearchHit {
        SearchHit {
            score,
            id: id.to_string(),
            title: format!("Bug {}", id),
            content: "content".to_string(),
            category: "Bug".to_string(),
        }
    }

    #[tokio::test]
    async fn mock_returns_configured_hits() {
        let index = MockSearchIndex::new().with_hits(vec![hit("1", 0.8)]);
        let hits = index.query_similar(&[0.0]).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(index.query_calls(), 1);
    }

    #[tokio::test]
    async fn mock_records_upserts() {
        let index = MockSearchIndex::new();
        let record = IndexRecord {
            id: "1".into(),
            title: "t".into(),
            content: "c".into(),
            category: "Bug".into(),
            title_vector: vec![],
            content_vector: vec![],
        };

        assert!(index.upsert(&record).await.unwrap());
        assert_eq!(index.upserted().len(), 1);
    }

    #[tokio::test]
    async fn rejecting_mock_reports_false_and_drops_record() {
        let index = MockSearchIndex::new().rejecting_upserts();
        let record = IndexRecord {
            id: "1".into(),
            title: "t".into(),
            content: "c".into(),
            category: "Bug".into(),
            title_vector: vec![],
            content_vector: vec![],
        };

        assert!(!index.upsert(&record).await.unwrap());
        assert!(index.upserted().is_empty());
    }
}
