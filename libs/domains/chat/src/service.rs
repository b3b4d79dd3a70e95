//! Chat Service - per-turn orchestration
//!
//! history (read) + retrieval ─► prompt ─► completion ─► history (write)

use domain_listings::ListingRetriever;
use std::sync::Arc;
use tracing::instrument;

use crate::completion::CompletionProvider;
use crate::error::{ChatError, ChatResult};
use crate::models::{ChatSettings, ConversationEntry, validate_session_id};
use crate::prompt::PromptBuilder;
use crate::repository::HistoryRepository;

/// Stateless orchestrator over injected history, retrieval and completion
/// collaborators.
pub struct ChatService<H: HistoryRepository> {
    history: Arc<H>,
    retriever: Arc<dyn ListingRetriever>,
    completion: Arc<dyn CompletionProvider>,
    prompt: PromptBuilder,
    settings: ChatSettings,
}

impl<H: HistoryRepository> ChatService<H> {
    pub fn new(
        history: H,
        retriever: Arc<dyn ListingRetriever>,
        completion: Arc<dyn CompletionProvider>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            history: Arc::new(history),
            retriever,
            completion,
            prompt: PromptBuilder::default(),
            settings,
        }
    }

    pub fn with_prompt_builder(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Answer one question and record the exchange.
    ///
    /// Nothing is written unless the completion succeeds.
    #[instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn handle(&self, email: &str, session_id: &str, question: &str) -> ChatResult<String> {
        if email.trim().is_empty() || session_id.is_empty() || question.trim().is_empty() {
            return Err(ChatError::Validation(
                "session_id, email, and question are required fields.".to_string(),
            ));
        }
        validate_session_id(session_id)?;

        let (history, listings) = tokio::try_join!(
            self.history.recent(email, session_id, self.settings.history_limit),
            async {
                self.retriever
                    .retrieve(question, self.settings.retrieval_limit)
                    .await
                    .map_err(ChatError::from)
            },
        )?;

        tracing::debug!(
            history = history.len(),
            listings = listings.len(),
            "Context assembled"
        );

        let system_prompt = self.prompt.build(&history, &listings);
        let answer = self.completion.complete(&system_prompt, question).await?;

        self.history
            .append(email, session_id, ConversationEntry::new(question, answer.clone()))
            .await?;

        tracing::info!("Chat turn completed");
        Ok(answer)
    }
}

impl<H: HistoryRepository> Clone for ChatService<H> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
            retriever: Arc::clone(&self.retriever),
            completion: Arc::clone(&self.completion),
            prompt: self.prompt.clone(),
            settings: self.settings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::MockCompletionProvider;
    use crate::repository::MockHistoryRepository;
    use domain_listings::{ListingError, ListingMatch, ListingResult};
    use mockall::predicate::eq;
    use mongodb::bson::Bson;

    struct StaticRetriever(Vec<ListingMatch>);

    #[async_trait::async_trait]
    impl ListingRetriever for StaticRetriever {
        async fn retrieve(&self, _query: &str, limit: u32) -> ListingResult<Vec<ListingMatch>> {
            Ok(self.0.iter().take(limit as usize).cloned().collect())
        }
    }

    struct DownRetriever;

    #[async_trait::async_trait]
    impl ListingRetriever for DownRetriever {
        async fn retrieve(&self, _query: &str, _limit: u32) -> ListingResult<Vec<ListingMatch>> {
            Err(ListingError::Database("vector index unavailable".into()))
        }
    }

    fn villa() -> ListingMatch {
        ListingMatch {
            id: Bson::String("p1".into()),
            text: Some("3BHK villa, Vijay Nagar, Indore".into()),
        }
    }

    #[tokio::test]
    async fn test_handle_reads_completes_and_appends() {
        let mut history = MockHistoryRepository::new();
        history
            .expect_recent()
            .with(eq("a@b.com"), eq("s1"), eq(10usize))
            .times(1)
            .returning(|_, _, _| Ok(vec![ConversationEntry::new("Hello", "Hello, how can I assist you?")]));
        history
            .expect_append()
            .withf(|email, session, entry| {
                email == "a@b.com"
                    && session == "s1"
                    && entry.req == "Villas in Indore?"
                    && entry.res == "Sure, which area?"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete()
            .withf(|prompt, question| {
                prompt.contains("User: Hello")
                    && prompt.contains("- [p1] 3BHK villa")
                    && question == "Villas in Indore?"
            })
            .times(1)
            .returning(|_, _| Ok("Sure, which area?".to_string()));

        let service = ChatService::new(
            history,
            Arc::new(StaticRetriever(vec![villa()])),
            Arc::new(completion),
            ChatSettings::default(),
        );

        let answer = service.handle("a@b.com", "s1", "Villas in Indore?").await.unwrap();
        assert_eq!(answer, "Sure, which area?");
    }

    #[tokio::test]
    async fn test_missing_fields_write_nothing() {
        let mut history = MockHistoryRepository::new();
        history.expect_recent().never();
        history.expect_append().never();

        let mut completion = MockCompletionProvider::new();
        completion.expect_complete().never();

        let service = ChatService::new(
            history,
            Arc::new(StaticRetriever(vec![])),
            Arc::new(completion),
            ChatSettings::default(),
        );

        for (email, session, question) in [("", "s1", "q"), ("a@b.com", "", "q"), ("a@b.com", "s1", " ")] {
            let err = service.handle(email, session, question).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_dotted_session_is_rejected() {
        let mut history = MockHistoryRepository::new();
        history.expect_append().never();

        let service = ChatService::new(
            history,
            Arc::new(StaticRetriever(vec![])),
            Arc::new(MockCompletionProvider::new()),
            ChatSettings::default(),
        );

        let err = service.handle("a@b.com", "s.1", "Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn test_completion_failure_writes_nothing() {
        let mut history = MockHistoryRepository::new();
        history.expect_recent().returning(|_, _, _| Ok(vec![]));
        history.expect_append().never();

        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete()
            .returning(|_, _| Err(ChatError::Upstream("timeout".into())));

        let service = ChatService::new(
            history,
            Arc::new(StaticRetriever(vec![])),
            Arc::new(completion),
            ChatSettings::default(),
        );

        let err = service.handle("a@b.com", "s1", "Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_retrieval_failure_propagates() {
        let mut history = MockHistoryRepository::new();
        history.expect_recent().returning(|_, _, _| Ok(vec![]));
        history.expect_append().never();

        let mut completion = MockCompletionProvider::new();
        completion.expect_complete().never();

        let service = ChatService::new(
            history,
            Arc::new(DownRetriever),
            Arc::new(completion),
            ChatSettings::default(),
        );

        let err = service.handle("a@b.com", "s1", "Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Database(_)));
    }

    #[tokio::test]
    async fn test_settings_limits_are_applied() {
        let mut history = MockHistoryRepository::new();
        history
            .expect_recent()
            .with(eq("a@b.com"), eq("s1"), eq(3usize))
            .returning(|_, _, _| Ok(vec![]));
        history.expect_append().returning(|_, _, _| Ok(()));

        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete()
            .withf(|prompt, _| prompt.matches("- [p1]").count() == 1)
            .returning(|_, _| Ok("ok".to_string()));

        let settings = ChatSettings {
            history_limit: 3,
            retrieval_limit: 1,
            ..ChatSettings::default()
        };
        let service = ChatService::new(
            history,
            Arc::new(StaticRetriever(vec![villa(), villa()])),
            Arc::new(completion),
            settings,
        );

        assert_eq!(service.handle("a@b.com", "s1", "q").await.unwrap(), "ok");
    }
}
