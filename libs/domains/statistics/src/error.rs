use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type StatisticsResult<T> = Result<T, StatisticsError>;

impl From<StatisticsError> for AppError {
    fn from(err: StatisticsError) -> Self {
        match err {
            StatisticsError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            StatisticsError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for StatisticsError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
