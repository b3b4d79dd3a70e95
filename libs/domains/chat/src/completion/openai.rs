use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::CompletionProvider;
use crate::error::{ChatError, ChatResult};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

#[derive(Clone)]
pub struct OpenAIChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl OpenAIChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl std::fmt::Debug for OpenAIChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIChatConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl FromEnv for OpenAIChatConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: env_or_default("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
        })
    }
}

/// Chat completions over the OpenAI HTTP API
pub struct OpenAIChatProvider {
    client: Client,
    config: OpenAIChatConfig,
}

impl OpenAIChatProvider {
    pub fn new(config: OpenAIChatConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: OpenAIChatConfig) -> Self {
        Self { client, config }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for OpenAIChatProvider {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> ChatResult<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ChatError::Upstream("OpenAI returned no completion content".to_string()))?;

        tracing::debug!(model = %self.config.model, chars = content.len(), "Completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn provider(server: &mockito::ServerGuard) -> OpenAIChatProvider {
        OpenAIChatProvider::new(OpenAIChatConfig::new("test-key").with_base_url(server.url()))
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::Json(serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "be helpful" },
                    { "role": "user", "content": "Hello" }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello, how can I assist you?"}}]}"#)
            .create_async()
            .await;

        let reply = provider(&server).complete("be helpful", "Hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "Hello, how can I assist you?");
    }

    #[tokio::test]
    async fn test_error_status_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let err = provider(&server).complete("p", "q").await.unwrap_err();
        match err {
            ChatError::Upstream(msg) => assert!(msg.contains("429")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .create_async()
            .await;

        let err = provider(&server).complete("p", "q").await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = provider(&server).complete("p", "q").await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_blank_content_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"  "}}]}"#)
            .create_async()
            .await;

        let err = provider(&server).complete("p", "q").await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_BASE_URL", Some("http://localhost:9999/v1")),
                ("OPENAI_CHAT_MODEL", None),
            ],
            || {
                let config = OpenAIChatConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://localhost:9999/v1");
                assert_eq!(config.model, DEFAULT_CHAT_MODEL);
            },
        );
    }
}
