//! MongoDB implementation of ListingRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Database,
    bson::{self, Bson, Document, doc},
};
use tracing::instrument;

use crate::error::{ListingError, ListingResult};
use crate::models::{EMBEDDING_FIELD, ListingMatch, TEXT_FIELD};
use crate::repository::ListingRepository;

/// MongoDB implementation of the ListingRepository
///
/// Similarity search relies on an Atlas vector index over `embedding`.
pub struct MongoListingRepository {
    db: Database,
}

impl MongoListingRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn to_bson_vector(values: &[f32]) -> Bson {
        Bson::Array(values.iter().map(|v| Bson::Double(f64::from(*v))).collect())
    }

    /// `$vectorSearch` in exact mode followed by an `_id`/`text` projection
    fn build_search_pipeline(index_name: &str, query_vector: &[f32], limit: u32) -> Vec<Document> {
        vec![
            doc! {
                "$vectorSearch": {
                    "index": index_name,
                    "path": EMBEDDING_FIELD,
                    "queryVector": Self::to_bson_vector(query_vector),
                    "exact": true,
                    "limit": i64::from(limit),
                }
            },
            doc! {
                "$project": { "_id": 1, TEXT_FIELD: 1 }
            },
        ]
    }
}

#[async_trait]
impl ListingRepository for MongoListingRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, collection: &str) -> ListingResult<Vec<Document>> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .await?;
        let records: Vec<Document> = cursor.try_collect().await?;

        tracing::debug!(count = records.len(), "Loaded records");
        Ok(records)
    }

    #[instrument(skip(self, embedding), fields(dimension = embedding.len()))]
    async fn set_embedding(
        &self,
        collection: &str,
        id: &Bson,
        embedding: &[f32],
    ) -> ListingResult<()> {
        let result = self
            .db
            .collection::<Document>(collection)
            .update_one(
                doc! { "_id": id.clone() },
                doc! { "$set": { EMBEDDING_FIELD: Self::to_bson_vector(embedding) } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ListingError::Database(format!(
                "record {} vanished from '{}' during sync",
                id, collection
            )));
        }

        Ok(())
    }

    #[instrument(skip(self, query_vector))]
    async fn vector_search(
        &self,
        collection: &str,
        index_name: &str,
        query_vector: &[f32],
        limit: u32,
    ) -> ListingResult<Vec<ListingMatch>> {
        let pipeline = Self::build_search_pipeline(index_name, query_vector, limit);

        let cursor = self
            .db
            .collection::<Document>(collection)
            .aggregate(pipeline)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        let matches = documents
            .into_iter()
            .map(bson::from_document::<ListingMatch>)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = matches.len(), "Vector search completed");
        Ok(matches)
    }
}
