//! OpenAI embedder implementation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::dedup::traits::{DedupError, Embedder, Result};

pub const EMBEDDING_DIMENSIONS: usize = 1536;

const EMBEDDINGS_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Embedder backed by the OpenAI embeddings endpoint.
///
/// Input text is stripped of HTML markup before the call to reduce the
/// token count.
pub struct OpenAiEmbedder {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(DedupError::EmptyInput);
        }

        let resp = self
            .http
            .post(EMBEDDINGS_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "input": strip_for_embedding(text),
                "model": self.model,
            }))
            .send()
            .await
            .map_err(|e| DedupError::Embedding(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DedupError::Embedding(format!("{}: {}", status, body)));
        }

        let response = resp
            .json::<EmbeddingResponse>()
            .await
            .map_err(|e| DedupError::Embedding(format!("Failed to parse response: {}", e)))?;

        response
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| DedupError::Embedding("No embedding in response".into()))
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Strip HTML tags and collapse the first line break before embedding.
///
/// Only the FIRST '\n' and FIRST '\r' are replaced. Every indexed
/// document was embedded with exactly this preprocessing, so any change
/// here invalidates the stored vectors.
fn strip_for_embedding(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut inside_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => inside_tag = true,
            '>' => inside_tag = false,
            _ if !inside_tag => stripped.push(ch),
            _ => {}
        }
    }

    stripped.replacen('\n', " ", 1).replacen('\r', "", 1)
}
