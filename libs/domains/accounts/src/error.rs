use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Admin not found: {0}")]
    AdminNotFound(Uuid),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is {0}")]
    AccountDisabled(String),

    /// The token is valid but its subject was deleted
    #[error("Account no longer exists")]
    SubjectGone,

    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Convert AccountError to AppError for standardized error responses
impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            AccountError::AdminNotFound(id) => {
                AppError::NotFound(format!("Admin {} not found", id))
            }
            AccountError::DuplicateEmail(_) => AppError::Conflict("Email already exists".into()),
            AccountError::DuplicateUsername(_) => {
                AppError::Conflict("Username already exists".into())
            }
            AccountError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".into())
            }
            AccountError::AccountDisabled(status) => {
                AppError::Unauthorized(format!("Account is {}", status))
            }
            AccountError::SubjectGone => AppError::Unauthorized("Account no longer exists".into()),
            AccountError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            AccountError::PasswordHash(msg) => AppError::InternalServerError(msg),
            AccountError::Token(msg) => AppError::InternalServerError(msg),
            AccountError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
