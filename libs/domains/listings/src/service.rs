//! Listing Service - embedding synchronization and similarity retrieval

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::embedding::EmbeddingProvider;
use crate::error::{ListingError, ListingResult};
use crate::models::{
    ListingMatch, RetrievalSettings, SyncReport, embeddable_text, lacks_embedding,
};
use crate::repository::ListingRepository;

/// Read-only similarity search over the configured listing collection.
///
/// The chat flow depends on this rather than on [`ListingService`] so it can
/// be exercised without a vector index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRetriever: Send + Sync {
    /// Top-`limit` records closest to `query`, closest first
    async fn retrieve(&self, query: &str, limit: u32) -> ListingResult<Vec<ListingMatch>>;
}

pub struct ListingService<R: ListingRepository> {
    repository: Arc<R>,
    embedder: Arc<dyn EmbeddingProvider>,
    settings: RetrievalSettings,
}

impl<R: ListingRepository> ListingService<R> {
    pub fn new(
        repository: R,
        embedder: Arc<dyn EmbeddingProvider>,
        settings: RetrievalSettings,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            embedder,
            settings,
        }
    }

    pub fn settings(&self) -> &RetrievalSettings {
        &self.settings
    }

    /// Fill in missing embeddings for every record of `collection`.
    ///
    /// Records are handled one at a time. Records that already carry an
    /// embedding are never rewritten. The first failure aborts the run and
    /// leaves earlier writes in place.
    #[instrument(skip(self))]
    pub async fn sync_embeddings(&self, collection: &str) -> ListingResult<SyncReport> {
        let collection = collection.trim();
        if collection.is_empty() {
            return Err(ListingError::Validation(
                "Collection name is required".to_string(),
            ));
        }

        let records = self.repository.find_all(collection).await?;
        let mut report = SyncReport {
            collection: collection.to_string(),
            total: records.len(),
            embedded: 0,
            skipped: 0,
        };

        if report.is_empty() {
            tracing::info!("No documents found, nothing to embed");
            return Ok(report);
        }

        for record in &records {
            if !lacks_embedding(record) {
                report.skipped += 1;
                continue;
            }

            let id = record.get("_id").cloned().ok_or_else(|| {
                ListingError::Internal(format!("record in '{}' has no _id", collection))
            })?;

            let embedding = self.embedder.embed(&embeddable_text(record)).await?;
            self.repository
                .set_embedding(collection, &id, &embedding)
                .await?;
            report.embedded += 1;
        }

        tracing::info!(
            total = report.total,
            embedded = report.embedded,
            skipped = report.skipped,
            model = self.embedder.model(),
            "Embedding sync finished"
        );
        Ok(report)
    }

    /// Similarity search against the configured collection and index
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &str, limit: u32) -> ListingResult<Vec<ListingMatch>> {
        if limit == 0 {
            return Err(ListingError::Validation(
                "Retrieval limit must be at least 1".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return Err(ListingError::Validation("Query text is required".to_string()));
        }

        let query_vector = self.embedder.embed(query).await?;
        self.repository
            .vector_search(
                &self.settings.collection,
                &self.settings.index_name,
                &query_vector,
                limit,
            )
            .await
    }
}

impl<R: ListingRepository> Clone for ListingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            embedder: Arc::clone(&self.embedder),
            settings: self.settings.clone(),
        }
    }
}

#[async_trait]
impl<R: ListingRepository + 'static> ListingRetriever for ListingService<R> {
    async fn retrieve(&self, query: &str, limit: u32) -> ListingResult<Vec<ListingMatch>> {
        self.search(query, limit).await
    }
}
