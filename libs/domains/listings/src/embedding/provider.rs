use async_trait::async_trait;

use crate::error::ListingResult;

/// Trait for embedding generation providers
///
/// A provider turns text into a fixed-length vector. Failures are reported as
/// `ListingError::Upstream` and never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model identifier sent to the provider
    fn model(&self) -> &str;

    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> ListingResult<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order
    async fn embed_batch(&self, texts: &[String]) -> ListingResult<Vec<Vec<f32>>>;
}
