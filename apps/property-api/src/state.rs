//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into each router (cheap: the driver types are handles to a shared pool).
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
