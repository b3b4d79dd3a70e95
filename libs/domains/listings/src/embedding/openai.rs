use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{ListingError, ListingResult};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// OpenAI embedding provider configuration
#[derive(Clone)]
pub struct OpenAIEmbeddingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl OpenAIEmbeddingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
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

impl std::fmt::Debug for OpenAIEmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIEmbeddingConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl FromEnv for OpenAIEmbeddingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: env_or_default("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        })
    }
}

/// OpenAI embeddings provider
pub struct OpenAIEmbeddingProvider {
    client: Client,
    config: OpenAIEmbeddingConfig,
}

impl OpenAIEmbeddingProvider {
    pub fn new(config: OpenAIEmbeddingConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Share one HTTP connection pool with other providers
    pub fn with_client(client: Client, config: OpenAIEmbeddingConfig) -> Self {
        Self { client, config }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn embed(&self, text: &str) -> ListingResult<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ListingError::Upstream("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> ListingResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ListingError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await?;

        let mut data = embedding_response.data;
        if data.len() != texts.len() || data.iter().any(|d| d.embedding.is_empty()) {
            return Err(ListingError::Upstream(format!(
                "OpenAI returned {} embeddings for {} inputs",
                data.len(),
                texts.len()
            )));
        }

        data.sort_by_key(|d| d.index);
        tracing::debug!(model = %self.config.model, count = data.len(), "Embeddings generated");

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}
