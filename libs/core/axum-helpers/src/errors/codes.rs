//! Type-safe error codes for API responses.
//!
//! Each code carries a client-facing identifier, an integer for logs and
//! dashboards, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1099)
    /// Request validation failed
    ValidationError,

    /// Requested resource was not found
    NotFound,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Generic client error
    BadRequest,

    // Server errors (1100-1199)
    /// An unexpected internal server error occurred
    InternalError,

    // Dependency errors (2000-2999)
    /// The document store failed
    DatabaseError,

    /// A hosted model provider failed or returned an unusable payload
    UpstreamError,
}

impl ErrorCode {
    /// Integer code for logging and monitoring
    pub const fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::NotFound => 1004,
            ErrorCode::JsonExtraction => 1009,
            ErrorCode::BadRequest => 1010,
            ErrorCode::InternalError => 1100,
            ErrorCode::DatabaseError => 2001,
            ErrorCode::UpstreamError => 2101,
        }
    }

    /// Identifier sent to clients in the `error` field
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::UpstreamError => "UPSTREAM_ERROR",
        }
    }

    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::JsonExtraction => "Failed to extract JSON from request body",
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::DatabaseError => "A database error occurred",
            ErrorCode::UpstreamError => "An upstream service failed to respond",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
