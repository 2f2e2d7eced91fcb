//! LLM adjudication of candidate matches.

mod openai;
#[cfg(test)]
mod mock;

pub use openai::{OpenAiJudge, ERROR_MARKER, SYSTEM_INSTRUCTION};
#[cfg(test)]
pub use mock::MockJudge;
