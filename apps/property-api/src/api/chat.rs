//! Chat routes
//!
//! Wires the chat domain to `POST /chat`.

use axum::Router;
use domain_chat::{ChatService, MongoHistoryRepository, OpenAIChatProvider, handlers};
use domain_listings::ListingRetriever;
use std::sync::Arc;

use crate::state::AppState;

fn history(state: &AppState) -> MongoHistoryRepository {
    MongoHistoryRepository::with_collection(state.db.clone(), &state.config.chat.history_collection)
}

/// Ensure history indexes exist before serving
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    history(state).create_indexes().await?;
    Ok(())
}

pub fn router(
    state: &AppState,
    http: reqwest::Client,
    retriever: Arc<dyn ListingRetriever>,
) -> Router {
    let completion = OpenAIChatProvider::with_client(http, state.config.completion.clone());
    let service = ChatService::new(
        history(state),
        retriever,
        Arc::new(completion),
        state.config.chat.clone(),
    );

    handlers::router(service)
}
