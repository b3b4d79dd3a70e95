//! Chat Domain
//!
//! Conversational property recommendations: per-session history, context
//! assembly, and a hosted completion model.
//!
//! ```text
//! handlers ── POST /chat
//!    │
//! service ─┬─ repository (history: MongoDB or in-memory)
//!          ├─ ListingRetriever (domain_listings)
//!          ├─ prompt (PromptBuilder + PersonaPolicy)
//!          └─ completion (OpenAI)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_chat::{ChatService, ChatSettings, MongoHistoryRepository, OpenAIChatConfig, OpenAIChatProvider, handlers};
//!
//! let history = MongoHistoryRepository::new(db);
//! let completion = OpenAIChatProvider::new(OpenAIChatConfig::new("sk-..."));
//! let service = ChatService::new(history, retriever, Arc::new(completion), ChatSettings::default());
//! let router = handlers::router(service);
//! ```

pub mod completion;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod prompt;
pub mod repository;
pub mod service;

pub use completion::{CompletionProvider, OpenAIChatConfig, OpenAIChatProvider};
pub use error::{ChatError, ChatResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryHistoryRepository;
pub use models::{ChatRequest, ChatResponse, ChatSettings, ConversationEntry, IdentityRecord};
pub use mongodb::MongoHistoryRepository;
pub use prompt::{PersonaPolicy, PromptBuilder};
pub use repository::HistoryRepository;
pub use service::ChatService;
