use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError, ErrorCode};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::PaymentStatus;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Missing, or owned by someone else
    #[error("Order with ID {0} not found or doesn't belong to you")]
    OrderNotFound(Uuid),

    #[error("Cannot change payment status from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotFound(id) => {
                AppError::NotFound(format!("Payment with ID {} not found", id))
            }
            e @ PaymentError::OrderNotFound(_) => AppError::NotFound(e.to_string()),
            e @ PaymentError::InvalidTransition { .. } => {
                AppError::rule(ErrorCode::InvalidStatusTransition, e.to_string())
            }
            PaymentError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            PaymentError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
