//! OpenAI chat-completion judge.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::dedup::traits::{DedupError, Judge, Result};
use crate::domain::dedup::types::{CompilationMatch, SearchHit};

const CHAT_COMPLETIONS_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Marker the model emits when the input is not a bug description.
pub const ERROR_MARKER: &str = "##ERROR##";

/// Fixed system instruction for the adjudication call.
pub const SYSTEM_INSTRUCTION: &str = "Decide if a described issue is already registered among a \
provided list of previously reported issues. Report each existing issue that matches, fully or \
partially. Output strictly a JSON array of objects `{id, mode}` where mode is 'partial' (issue \
only partially covers the description) or 'full' (issue fully covers the description); output \
`[]` if nothing matches. If the input is clearly not an error description, output the marker \
`##ERROR##` followed by a short message telling the user to provide a valid error description.";

/// Judge backed by an OpenAI chat-completion model.
///
/// Each candidate hit is framed as prior assistant context
/// (`"Id: {id}\n\n{content}"`) and the user's raw query is the final
/// message.
pub struct OpenAiJudge {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiJudge {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        }
    }
}

#[async_trait]
impl Judge for OpenAiJudge {
    async fn adjudicate(&self, query: &str, hits: &[SearchHit]) -> Result<Vec<CompilationMatch>> {
        let messages = build_messages(query, hits);

        let resp = self
            .http
            .post(CHAT_COMPLETIONS_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": messages,
            }))
            .send()
            .await
            .map_err(|e| DedupError::Adjudication(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DedupError::Adjudication(format!("{}: {}", status, body)));
        }

        let response = resp
            .json::<ChatResponse>()
            .await
            .map_err(|e| DedupError::Adjudication(format!("Failed to parse response: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DedupError::Adjudication("No choices in response".into()))?;

        parse_verdict(&content, hits)
    }
}

fn build_messages(query: &str, hits: &[SearchHit]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(hits.len() + 2);
    messages.push(ChatMessage {
        role: "system",
        content: SYSTEM_INSTRUCTION.to_string(),
    });
    for hit in hits {
        messages.push(ChatMessage {
            role: "assistant",
            content: format!("Id: {}\n\n{}", hit.id, hit.content),
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: query.to_string(),
    });
    messages
}

/// Parse the model's single text response into a verdict.
///
/// Three outcomes:
/// - the `##ERROR##` marker anywhere in the response turns the trimmed
///   suffix into a user-visible [`DedupError::InvalidQuery`];
/// - otherwise the text must parse as a JSON array of `{id, mode}`;
/// - ids not present in `hits` are a [`DedupError::Protocol`] failure,
///   never silently filtered.
fn parse_verdict(content: &str, hits: &[SearchHit]) -> Result<Vec<CompilationMatch>> {
    if let Some(marker_index) = content.find(ERROR_MARKER) {
        let message = content[marker_index + ERROR_MARKER.len()..].trim();
        return Err(DedupError::InvalidQuery(message.to_string()));
    }

    let matches: Vec<CompilationMatch> = serde_json::from_str(content.trim())
        .map_err(|e| DedupError::Protocol(format!("{} in '{}'", e, content.trim())))?;

    for matched in &matches {
        if !hits.iter().any(|hit| hit.id == matched.id) {
            return Err(DedupError::Protocol(format!(
                "Adjudicator referenced id '{}' that was never supplied",
                matched.id
            )));
        }
    }

    Ok(matches)
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
