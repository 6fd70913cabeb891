//! Type-safe error codes for API responses.
//!
//! Each code has a SCREAMING_SNAKE_CASE identifier for clients, an integer for
//! logs and dashboards, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InsufficientStock;
//! assert_eq!(code.as_str(), "INSUFFICIENT_STOCK");
//! assert_eq!(code.code(), 1101);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// Ranges:
/// - 1000-1099: request errors
/// - 1100-1199: business rule violations
/// - 2000-2099: storage errors
/// - 5000-5099: server errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    /// Body missing, not JSON, or wrong shape
    InvalidJson,
    InvalidQuery,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,

    /// Requested quantity exceeds available stock
    InsufficientStock,
    /// Order placement from an empty cart
    EmptyCart,
    /// Status change not allowed from the current status
    InvalidStatusTransition,

    /// Pool exhausted or database unreachable; safe to retry
    StorageUnavailable,
    StorageError,

    InternalError,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::EmptyCart => "EMPTY_CART",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::StorageError => "STORAGE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::InvalidJson => 1003,
            Self::InvalidQuery => 1004,
            Self::NotFound => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::BadRequest => 1009,

            Self::InsufficientStock => 1101,
            Self::EmptyCart => 1102,
            Self::InvalidStatusTransition => 1103,

            Self::StorageUnavailable => 2001,
            Self::StorageError => 2002,

            Self::InternalError => 5001,
            Self::ServiceUnavailable => 5002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::InvalidJson => "Invalid JSON body",
            Self::InvalidQuery => "Invalid query string",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::InsufficientStock => "Insufficient stock",
            Self::EmptyCart => "Cart is empty",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::StorageUnavailable => "Storage is temporarily unavailable, retry later",
            Self::StorageError => "A storage error occurred",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
