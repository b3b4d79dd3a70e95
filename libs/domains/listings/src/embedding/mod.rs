mod openai;
mod provider;

pub use openai::{OpenAIEmbeddingConfig, OpenAIEmbeddingProvider};
#[cfg(test)]
pub use provider::MockEmbeddingProvider;
pub use provider::EmbeddingProvider;
