mod openai;
mod provider;

pub use openai::{OpenAIChatConfig, OpenAIChatProvider};
#[cfg(test)]
pub use provider::MockCompletionProvider;
pub use provider::CompletionProvider;
