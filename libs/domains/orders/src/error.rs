use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError, ErrorCode};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::OrderStatus;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Product with ID {0} not found")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {product_name}")]
    InsufficientStock {
        product_id: Uuid,
        product_name: String,
    },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Another request changed the status between read and write
    #[error("Order {0} was modified concurrently")]
    StatusChanged(Uuid),

    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::OrderNotFound(id) => {
                AppError::NotFound(format!("Order with ID {} not found", id))
            }
            e @ OrderError::ProductNotFound(_) => AppError::NotFound(e.to_string()),
            e @ OrderError::InsufficientStock { .. } => {
                AppError::rule(ErrorCode::InsufficientStock, e.to_string())
            }
            e @ OrderError::EmptyCart => AppError::rule(ErrorCode::EmptyCart, e.to_string()),
            e @ OrderError::InvalidTransition { .. } => {
                AppError::rule(ErrorCode::InvalidStatusTransition, e.to_string())
            }
            e @ OrderError::StatusChanged(_) => AppError::Conflict(e.to_string()),
            OrderError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            OrderError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
