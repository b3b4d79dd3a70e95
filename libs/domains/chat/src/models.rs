use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ChatError, ChatResult};

pub const DEFAULT_HISTORY_COLLECTION: &str = "chat_history";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One request/response exchange. Never modified after it is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// What the user asked
    pub req: String,
    /// What the assistant answered
    pub res: String,
    pub timestamp: DateTime,
}

impl ConversationEntry {
    pub fn new(req: impl Into<String>, res: impl Into<String>) -> Self {
        Self {
            req: req.into(),
            res: res.into(),
            timestamp: DateTime::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    #[serde(default)]
    pub chat: Vec<ConversationEntry>,
}

/// Stored shape of one identity: `{email, history: {<session>: {chat: [...]}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub email: String,
    #[serde(default)]
    pub history: HashMap<String, SessionHistory>,
}

impl IdentityRecord {
    /// Last `limit` entries of a session, oldest first
    pub fn tail(mut self, session_id: &str, limit: usize) -> Vec<ConversationEntry> {
        let mut chat = self
            .history
            .remove(session_id)
            .map(|session| session.chat)
            .unwrap_or_default();
        let start = chat.len().saturating_sub(limit);
        chat.split_off(start)
    }
}

/// Session ids become a document path segment, so `.` and a leading `$`
/// are rejected.
pub fn validate_session_id(session_id: &str) -> ChatResult<()> {
    if session_id.is_empty() {
        return Err(ChatError::Validation("session_id is required".to_string()));
    }
    if session_id.contains('.') || session_id.starts_with('$') {
        return Err(ChatError::Validation(format!(
            "session_id '{}' must not contain '.' or start with '$'",
            session_id
        )));
    }
    Ok(())
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ChatRequest {
    #[validate(required, length(min = 1))]
    #[schema(example = "s1")]
    pub session_id: Option<String>,

    #[validate(required, length(min = 1))]
    #[schema(example = "a@b.com")]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    #[schema(example = "Any 2BHK in Indore under 50L?")]
    pub question: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Assistant reply
    pub response: String,
}

/// Orchestrator tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub history_collection: String,
    /// Prior exchanges included in each prompt
    pub history_limit: usize,
    /// Listings retrieved per question
    pub retrieval_limit: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_collection: DEFAULT_HISTORY_COLLECTION.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            retrieval_limit: domain_listings::DEFAULT_RETRIEVAL_LIMIT,
        }
    }
}

impl FromEnv for ChatSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let retrieval_limit = env_parse_or("RETRIEVAL_LIMIT", domain_listings::DEFAULT_RETRIEVAL_LIMIT)?;
        if retrieval_limit == 0 {
            return Err(ConfigError::ParseError {
                key: "RETRIEVAL_LIMIT".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            history_collection: env_or_default("CHAT_HISTORY_COLLECTION", DEFAULT_HISTORY_COLLECTION),
            history_limit: env_parse_or("CHAT_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?,
            retrieval_limit,
        })
    }
}
