//! Embedding sync routes
//!
//! Wires the listings domain to `POST /embed`.

use axum::Router;
use domain_listings::{ListingService, MongoListingRepository, OpenAIEmbeddingProvider, handlers};
use std::sync::Arc;

use crate::state::AppState;

/// Listing service backed by MongoDB and the configured embedding model
pub fn service(state: &AppState, http: reqwest::Client) -> ListingService<MongoListingRepository> {
    let repository = MongoListingRepository::new(state.db.clone());
    let embedder = OpenAIEmbeddingProvider::with_client(http, state.config.embedding.clone());

    ListingService::new(repository, Arc::new(embedder), state.config.retrieval.clone())
}

pub fn router(service: ListingService<MongoListingRepository>) -> Router {
    handlers::router(service)
}
