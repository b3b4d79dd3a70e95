use async_trait::async_trait;

use crate::error::ChatResult;
use crate::models::ConversationEntry;

/// Append-only conversation log keyed by (email, session)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append one exchange, creating the identity on first write
    async fn append(&self, email: &str, session_id: &str, entry: ConversationEntry)
    -> ChatResult<()>;

    /// Last `limit` exchanges of a session, oldest first.
    ///
    /// Unknown identities and sessions yield an empty list.
    async fn recent(
        &self,
        email: &str,
        session_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<ConversationEntry>>;
}

/// Lets callers keep a handle on a store they hand to a service
#[async_trait]
impl<T: HistoryRepository + ?Sized> HistoryRepository for std::sync::Arc<T> {
    async fn append(&self, email: &str, session_id: &str, entry: ConversationEntry)
    -> ChatResult<()> {
        (**self).append(email, session_id, entry).await
    }

    async fn recent(
        &self,
        email: &str,
        session_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<ConversationEntry>> {
        (**self).recent(email, session_id, limit).await
    }
}
