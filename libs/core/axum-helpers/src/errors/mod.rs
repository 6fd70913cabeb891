pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::{DbErrKind, classify_db_err};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1101,
///   "error": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for product Desk Lamp",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Structured details, e.g. validation errors per field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error rendered as an [`ErrorResponse`].
///
/// Domain crates convert their own error enums into this type at the HTTP
/// boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A business rule rejected the request; rendered as 400 with a specific code
    #[error("{code}: {message}")]
    Rule { code: ErrorCode, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn rule(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Rule {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::JsonExtractorRejection(_)
            | AppError::QueryExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::Rule { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(e) => match classify_db_err(e) {
                DbErrKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                DbErrKind::UniqueViolation(_) => StatusCode::CONFLICT,
                DbErrKind::ForeignKeyViolation(_) => StatusCode::BAD_REQUEST,
                DbErrKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidJson.code(), "Invalid JSON body: {}", e);
                (ErrorCode::InvalidJson, e.body_text(), None)
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidQuery.code(), "Invalid query: {}", e);
                (ErrorCode::InvalidQuery, e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Validation error: {}", e);
                (
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (ErrorCode::BadRequest, msg, None)
            }
            AppError::Rule { code, message } => {
                tracing::info!(error_code = code.code(), "Rule violation: {}", message);
                (code, message, None)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (ErrorCode::Unauthorized, msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (ErrorCode::Forbidden, msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (ErrorCode::NotFound, msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (ErrorCode::Conflict, msg, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                (
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (ErrorCode::ServiceUnavailable, msg, None)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Per-field validation errors as `{field: [{code, message, params}]}`
fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    serde_json::to_value(errors).unwrap_or(serde_json::Value::Null)
}

fn map_db_error(error: &DbErr) -> (ErrorCode, String, Option<serde_json::Value>) {
    match classify_db_err(error) {
        DbErrKind::Unavailable => {
            tracing::warn!(error_code = ErrorCode::StorageUnavailable.code(), "Storage unavailable: {}", error);
            (
                ErrorCode::StorageUnavailable,
                ErrorCode::StorageUnavailable.default_message().to_string(),
                None,
            )
        }
        DbErrKind::UniqueViolation(detail) => {
            tracing::info!(error_code = ErrorCode::Conflict.code(), "Unique violation: {}", detail);
            (
                ErrorCode::Conflict,
                ErrorCode::Conflict.default_message().to_string(),
                None,
            )
        }
        DbErrKind::ForeignKeyViolation(detail) => {
            tracing::info!(error_code = ErrorCode::BadRequest.code(), "Foreign key violation: {}", detail);
            (
                ErrorCode::BadRequest,
                "Referenced resource does not exist".to_string(),
                None,
            )
        }
        DbErrKind::Other => {
            tracing::error!(error_code = ErrorCode::StorageError.code(), "Storage error: {:?}", error);
            (
                ErrorCode::StorageError,
                ErrorCode::StorageError.default_message().to_string(),
                None,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sea_orm::ConnAcquireErr;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_renders_404_body() {
        let (status, body) = render(AppError::NotFound("Order x not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["code"], 1005);
        assert_eq!(body["message"], "Order x not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_rule_keeps_specific_code() {
        let err = AppError::rule(ErrorCode::InsufficientStock, "Insufficient stock for product Lamp");
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INSUFFICIENT_STOCK");
        assert_eq!(body["message"], "Insufficient stock for product Lamp");
    }

    #[tokio::test]
    async fn test_pool_timeout_is_retryable_503() {
        let err = AppError::Database(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "STORAGE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = render(AppError::InternalServerError("secret detail".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], ErrorCode::InternalError.default_message());
    }
}
