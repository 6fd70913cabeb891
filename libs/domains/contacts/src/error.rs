use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact message with ID {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ContactResult<T> = Result<T, ContactError>;

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            e @ ContactError::NotFound(_) => AppError::NotFound(e.to_string()),
            ContactError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            ContactError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
