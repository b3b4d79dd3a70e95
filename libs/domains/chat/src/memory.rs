//! In-process HistoryRepository for tests and single-node use without a
//! document store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::ChatResult;
use crate::models::ConversationEntry;
use crate::repository::HistoryRepository;

type Sessions = HashMap<String, Vec<ConversationEntry>>;

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    identities: RwLock<HashMap<String, Sessions>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entries stored for a session
    pub async fn entry_count(&self, email: &str, session_id: &str) -> usize {
        self.identities
            .read()
            .await
            .get(email)
            .and_then(|sessions| sessions.get(session_id))
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(
        &self,
        email: &str,
        session_id: &str,
        entry: ConversationEntry,
    ) -> ChatResult<()> {
        self.identities
            .write()
            .await
            .entry(email.to_string())
            .or_default()
            .entry(session_id.to_string())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn recent(
        &self,
        email: &str,
        session_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<ConversationEntry>> {
        let identities = self.identities.read().await;
        let Some(chat) = identities.get(email).and_then(|s| s.get(session_id)) else {
            return Ok(vec![]);
        };

        let start = chat.len().saturating_sub(limit);
        Ok(chat[start..].to_vec())
    }
}
