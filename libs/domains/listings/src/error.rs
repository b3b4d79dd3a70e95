use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
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

pub type ListingResult<T> = Result<T, ListingError>;

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Validation(msg) => AppError::BadRequest(msg),
            ListingError::Database(msg) => AppError::Database(msg),
            ListingError::Upstream(msg) => AppError::Upstream(msg),
            ListingError::Config(msg) => AppError::InternalServerError(msg),
            ListingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ListingError {
    fn from(err: mongodb::error::Error) -> Self {
        ListingError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for ListingError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        ListingError::Database(format!("unexpected document shape: {}", err))
    }
}

impl From<reqwest::Error> for ListingError {
    fn from(err: reqwest::Error) -> Self {
        ListingError::Upstream(err.to_string())
    }
}

impl From<ConfigError> for ListingError {
    fn from(err: ConfigError) -> Self {
        ListingError::Config(err.to_string())
    }
}
