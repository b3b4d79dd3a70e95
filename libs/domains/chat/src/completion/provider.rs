use async_trait::async_trait;

use crate::error::ChatResult;

/// Hosted chat-completion model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Single-turn completion: system instructions plus the user's message
    async fn complete(&self, system_prompt: &str, user_message: &str) -> ChatResult<String>;
}
