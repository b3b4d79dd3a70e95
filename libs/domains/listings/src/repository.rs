use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::ListingResult;
use crate::models::ListingMatch;

/// Data access for embeddable record collections
///
/// Records are schemaless documents; the only field this layer writes is
/// `embedding`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Load every record of a collection in natural order
    async fn find_all(&self, collection: &str) -> ListingResult<Vec<Document>>;

    /// Store the embedding of one record
    async fn set_embedding(
        &self,
        collection: &str,
        id: &Bson,
        embedding: &[f32],
    ) -> ListingResult<()>;

    /// Exact nearest-neighbour search, closest first
    async fn vector_search(
        &self,
        collection: &str,
        index_name: &str,
        query_vector: &[f32],
        limit: u32,
    ) -> ListingResult<Vec<ListingMatch>>;
}
