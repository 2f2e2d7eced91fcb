//! Mock judge for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::dedup::traits::{DedupError, Judge, Result};
use crate::domain::dedup::types::{CompilationMatch, SearchHit};

#[derive(Clone)]
enum Verdict {
    Matches(Vec<CompilationMatch>),
    InvalidQuery(String),
    Protocol(String),
}

/// Mock judge that returns a configured verdict and records its calls.
#[derive(Clone)]
pub struct MockJudge {
    verdict: Verdict,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl MockJudge {
    /// Always return the given matches.
    pub fn returning(matches: Vec<CompilationMatch>) -> Self {
        Self {
            verdict: Verdict::Matches(matches),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always reject the query as not being a bug description.
    pub fn rejecting_query(message: &str) -> Self {
        Self {
            verdict: Verdict::InvalidQuery(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with a protocol violation.
    pub fn malformed(message: &str) -> Self {
        Self {
            verdict: Verdict::Protocol(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The `(query, hit ids)` pairs `adjudicate` was called with.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Judge for MockJudge {
    async fn adjudicate(&self, query: &str, hits: &[SearchHit]) -> Result<Vec<CompilationMatch>> {
        self.calls.lock().unwrap().push((
            query.to_string(),
            hits.iter().map(|hit| hit.id.clone()).collect(),
        ));

        match &self.verdict {
            Verdict::Matches(matches) => Ok(matches.clone()),
            Verdict::InvalidQuery(message) => Err(DedupError::InvalidQuery(message.clone())),
            Verdict::Protocol(message) => Err(DedupError::Protocol(message.clone())),
        }
    }
}
