//! Mock embedder implementation for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::dedup::traits::{DedupError, Embedder, Result};

/// Mock embedder that returns configurable vectors and records its input.
#[derive(Clone)]
pub struct MockEmbedder {
    responses: Arc<Vec<Vec<f32>>>,
    call_count: Arc<AtomicUsize>,
    inputs: Arc<Mutex<Vec<String>>>,
    dimensions: usize,
}

impl MockEmbedder {
    /// Create a mock that always returns the same vector.
    pub fn returning(vector: Vec<f32>) -> Self {
        let dims = vector.len();
        Self {
            responses: Arc::new(vec![vector]),
            call_count: Arc::new(AtomicUsize::new(0)),
            inputs: Arc::new(Mutex::new(Vec::new())),
            dimensions: dims,
        }
    }

    /// Create a mock that returns vectors in sequence.
    ///
    /// Wraps around if more calls are made than vectors provided.
    pub fn with_sequence(vectors: Vec<Vec<f32>>) -> Self {
        let dims = vectors.first().map(|v| v.len()).unwrap_or(1536);
        Self {
            responses: Arc::new(vectors),
            call_count: Arc::new(AtomicUsize::new(0)),
            inputs: Arc::new(Mutex::new(Vec::new())),
            dimensions: dims,
        }
    }

    /// Create a mock with default 1536-dimensional zero vectors.
    pub fn default_dims() -> Self {
        Self::returning(vec![0.0; 1536])
    }

    /// Number of times `embed` was called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The texts `embed` was called with, in order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::default_dims()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(DedupError::EmptyInput);
        }
        self.inputs.lock().unwrap().push(text.to_string());
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        let response_idx = idx % self.responses.len();
        Ok(self.responses[response_idx].clone())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_fixed_vector() {
        let embedder = MockEmbedder::returning(vec![1.0, 2.0, 3.0]);

        let result = embedder.embed("test").await.unwrap();
        assert_eq!(result, vec![1.0, 2.0, 3.0]);

        let result = embedder.embed("another").await.unwrap();
        assert_eq!(result, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn mock_returns_sequence() {
        let embedder = MockEmbedder::with_sequence(vec![vec![1.0], vec![2.0]]);

        assert_eq!(embedder.embed("a").await.unwrap(), vec![1.0]);
        assert_eq!(embedder.embed("b").await.unwrap(), vec![2.0]);
        // Wraps around
        assert_eq!(embedder.embed("c").await.unwrap(), vec![1.0]);
    }

    #[tokio::test]
    async fn mock_tracks_calls_and_inputs() {
        let embedder = MockEmbedder::default();

        embedder.embed("a").await.unwrap();
        embedder.embed("b").await.unwrap();

        assert_eq!(embedder.call_count(), 2);
        assert_eq!(embedder.inputs(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn mock_rejects_empty_input() {
        let embedder = MockEmbedder::default();
        assert!(embedder.embed("").await.is_err());
    }
}
