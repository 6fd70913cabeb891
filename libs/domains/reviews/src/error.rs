use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// Missing, or written by someone else
    #[error("Review not found: {0}")]
    NotFound(Uuid),

    #[error("Product with ID {0} not found")]
    ProductNotFound(Uuid),

    #[error("You have already reviewed this product")]
    AlreadyReviewed,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(id) => {
                AppError::NotFound(format!("Review with ID {} not found", id))
            }
            e @ ReviewError::ProductNotFound(_) => AppError::NotFound(e.to_string()),
            e @ ReviewError::AlreadyReviewed => AppError::Conflict(e.to_string()),
            ReviewError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
