//! Trait definitions for the duplicate-detection seams.
//!
//! These traits enable dependency injection and testing through mocks.

use async_trait::async_trait;

use super::types::{CompilationMatch, IndexRecord, SearchHit};

/// Error type for duplicate-detection operations.
#[derive(Debug, thiserror::Error)]
pub enum DedupError {
    /// The user's input was judged invalid (empty, or not a bug
    /// description). Surfaced as a 400, never as a system fault.
    #[error("{0}")]
    InvalidQuery(String),

    #[error("Cannot create an embedding from empty text")]
    EmptyInput,

    #[error("Embedding request failed: {0}")]
    Embedding(String),

    #[error("Search index request failed: {0}")]
    Index(String),

    #[error("Adjudication request failed: {0}")]
    Adjudication(String),

    /// The adjudicator's response was neither the error-marker form nor
    /// a valid JSON match list. Fail-fast, no silent coercion.
    #[error("Malformed adjudicator response: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, DedupError>;

/// Turns arbitrary text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single non-empty text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensions produced by this embedder.
    #[allow(dead_code)]
    fn dimensions(&self) -> usize;
}

/// The hosted vector index.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Idempotently create or replace the index schema.
    async fn ensure_index(&self) -> Result<()>;

    /// Upsert a single record.
    ///
    /// Returns `true` on success; a non-2xx response from the index
    /// service is logged and reported as `false` (non-fatal to the
    /// import loop).
    async fn upsert(&self, record: &IndexRecord) -> Result<bool>;

    /// k-nearest-neighbor query against the content vector field.
    ///
    /// Returns the raw hits, unfiltered; relevance filtering is the
    /// caller's concern.
    async fn query_similar(&self, vector: &[f32]) -> Result<Vec<SearchHit>>;
}

/// LLM adjudication of candidate matches against the user's description.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Classify each candidate as a full or partial duplicate.
    ///
    /// Candidates the model does not consider matches are simply absent
    /// from the returned list. A query judged not to be a bug
    /// description yields [`DedupError::InvalidQuery`].
    async fn adjudicate(&self, query: &str, hits: &[SearchHit]) -> Result<Vec<CompilationMatch>>;
}
