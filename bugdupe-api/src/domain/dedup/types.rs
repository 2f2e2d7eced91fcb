//! Core types for the duplicate-detection domain.

use serde::{Deserialize, Serialize};

/// A document stored in the vector index, one per eligible work item.
///
/// Subsequent writes with the same id overwrite (last-write-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub title: String,
    /// Markdown rendition of the work-item description, truncated.
    pub content: String,
    /// Work-item type ("Bug", ...).
    pub category: String,
    #[serde(rename = "titleVector")]
    pub title_vector: Vec<f32>,
    #[serde(rename = "contentVector")]
    pub content_vector: Vec<f32>,
}

/// One nearest-neighbor result from the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "@search.score")]
    pub score: f64,
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
}

/// The adjudicator's verdict for one candidate match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationMatch {
    pub id: String,
    pub mode: MatchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// How much of the described issue an existing work item covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Partial,
    Full,
}
