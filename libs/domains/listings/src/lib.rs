//! Listings Domain
//!
//! Embedding maintenance and similarity retrieval over property records
//! stored in MongoDB.
//!
//! ```text
//! handlers ── POST /embed
//!    │
//! service ─── sync_embeddings, search (ListingRetriever)
//!    │                 │
//! repository      embedding
//! (MongoDB)       (OpenAI)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_listings::{
//!     MongoListingRepository, ListingService, OpenAIEmbeddingConfig, OpenAIEmbeddingProvider,
//!     RetrievalSettings, handlers,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoListingRepository::new(client.database("realestate"));
//! let embedder = OpenAIEmbeddingProvider::new(OpenAIEmbeddingConfig::new("sk-..."));
//! let settings = RetrievalSettings::new("properties", "vector_index");
//!
//! let service = ListingService::new(repository, Arc::new(embedder), settings);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use embedding::{EmbeddingProvider, OpenAIEmbeddingConfig, OpenAIEmbeddingProvider};
pub use error::{ListingError, ListingResult};
pub use handlers::ApiDoc;
pub use models::{
    DEFAULT_RETRIEVAL_LIMIT, EmbedRequest, EmbedResponse, ListingMatch, RetrievalSettings,
    SyncReport, embeddable_text,
};
pub use mongodb::MongoListingRepository;
pub use repository::ListingRepository;
pub use service::{ListingRetriever, ListingService};
