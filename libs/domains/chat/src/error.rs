use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use domain_listings::ListingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(msg) => AppError::BadRequest(msg),
            ChatError::Database(msg) => AppError::Database(msg),
            ChatError::Upstream(msg) => AppError::Upstream(msg),
            ChatError::Config(msg) => AppError::InternalServerError(msg),
            ChatError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Retrieval failures keep their category
impl From<ListingError> for ChatError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Validation(msg) => ChatError::Validation(msg),
            ListingError::Database(msg) => ChatError::Database(msg),
            ListingError::Upstream(msg) => ChatError::Upstream(msg),
            ListingError::Config(msg) => ChatError::Config(msg),
            ListingError::Internal(msg) => ChatError::Internal(msg),
        }
    }
}

impl From<mongodb::error::Error> for ChatError {
    fn from(err: mongodb::error::Error) -> Self {
        ChatError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ChatError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ChatError::Internal(format!("failed to encode history entry: {}", err))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Upstream(err.to_string())
    }
}

impl From<ConfigError> for ChatError {
    fn from(err: ConfigError) -> Self {
        ChatError::Config(err.to_string())
    }
}
