//! MongoDB implementation of HistoryRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::ChatResult;
use crate::models::{ConversationEntry, DEFAULT_HISTORY_COLLECTION, IdentityRecord, validate_session_id};
use crate::repository::HistoryRepository;

/// One document per email; sessions are nested under `history`.
pub struct MongoHistoryRepository {
    collection: Collection<IdentityRecord>,
}

impl MongoHistoryRepository {
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_HISTORY_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<IdentityRecord>(collection_name),
        }
    }

    /// Unique index on `email` so concurrent first writes upsert one document
    pub async fn create_indexes(&self) -> ChatResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Chat history indexes ensured");
        Ok(())
    }

    fn chat_path(session_id: &str) -> String {
        format!("history.{}.chat", session_id)
    }
}

#[async_trait]
impl HistoryRepository for MongoHistoryRepository {
    #[instrument(skip(self, entry))]
    async fn append(
        &self,
        email: &str,
        session_id: &str,
        entry: ConversationEntry,
    ) -> ChatResult<()> {
        validate_session_id(session_id)?;

        let path = Self::chat_path(session_id);
        let entry = to_bson(&entry)?;

        self.collection
            .update_one(doc! { "email": email }, doc! { "$push": { path: entry } })
            .upsert(true)
            .await?;

        tracing::debug!("History entry appended");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent(
        &self,
        email: &str,
        session_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<ConversationEntry>> {
        validate_session_id(session_id)?;
        if limit == 0 {
            return Ok(vec![]);
        }

        let session_path = format!("history.{}", session_id);
        let record = self
            .collection
            .find_one(doc! { "email": email })
            .projection(doc! { "email": 1, session_path: 1 })
            .await?;

        Ok(record
            .map(|record| record.tail(session_id, limit))
            .unwrap_or_default())
    }
}
