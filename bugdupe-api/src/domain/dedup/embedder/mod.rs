//! Embedding generation implementations.

mod openai;
#[cfg(test)]
mod mock;

pub use openai::OpenAiEmbedder;
#[cfg(test)]
pub use mock::MockEmbedder;
