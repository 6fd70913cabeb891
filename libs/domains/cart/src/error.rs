use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::MAX_CART_QUANTITY;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Cart item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Cart quantity for product {0} would exceed {max}", max = MAX_CART_QUANTITY)]
    QuantityLimitExceeded(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product with ID {} not found", id))
            }
            CartError::ItemNotFound(id) => {
                AppError::NotFound(format!("Cart item with ID {} not found", id))
            }
            e @ CartError::QuantityLimitExceeded(_) => AppError::BadRequest(e.to_string()),
            CartError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
