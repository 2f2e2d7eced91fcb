//! Duplicate-bug detection pipeline.
//!
//! A free-text bug description is embedded, matched against previously
//! indexed work items in a hosted vector index, and the surviving
//! candidates are adjudicated by an LLM into full/partial duplicates.
//!
//! The pipeline is built around trait seams for testability:
//!
//! - [`Embedder`] - text embedding generation (OpenAI, mocks)
//! - [`SearchIndex`] - the hosted vector index (Azure AI Search, mocks)
//! - [`Judge`] - LLM adjudication of candidate matches (OpenAI, mocks)
//!
//! # Serving path
//!
//! ```ignore
//! let service = DedupService::new(embedder, index, judge);
//! let matches = service.find_duplicates("app crashes on login").await?;
//! ```
//!
//! # Import path
//!
//! [`Indexer`] drives the offline batch import: exported work items are
//! hydrated, converted to markdown, embedded and upserted one at a time.

mod adjudicator;
mod embedder;
mod index;
mod indexer;
mod service;
mod traits;
mod types;

pub use adjudicator::{OpenAiJudge, ERROR_MARKER, SYSTEM_INSTRUCTION};
pub use embedder::OpenAiEmbedder;
pub use index::AzureSearchIndex;
pub use indexer::{ImportError, ImportStats, Indexer, MAX_CONTENT_CHARS};
pub use service::{DedupService, RELEVANCE_THRESHOLD};
pub use traits::{DedupError, Embedder, Judge, SearchIndex};
pub use types::{CompilationMatch, IndexRecord, MatchMode, SearchHit};

#[cfg(test)]
pub(crate) use adjudicator::MockJudge;
#[cfg(test)]
pub(crate) use embedder::MockEmbedder;
#[cfg(test)]
pub(crate) use index::MockSearchIndex;
