//! HTTP routes, all mounted at the root path.

pub mod chat;
pub mod embed;
pub mod health;
pub mod root;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Create all API routes
///
/// One HTTP client and one listing service are shared by `/embed` and the
/// retrieval step of `/chat`.
pub fn routes(state: &AppState) -> Router {
    let http = reqwest::Client::new();
    let listings = embed::service(state, http.clone());

    Router::new()
        .merge(root::router())
        .merge(chat::router(state, http, Arc::new(listings.clone())))
        .merge(embed::router(listings))
        .merge(health::router(state.clone()))
}
