use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("Product with ID {0} not found")]
    ProductNotFound(Uuid),

    #[error("Product is already in your wishlist")]
    AlreadyInWishlist,

    #[error("Wishlist item with ID {0} not found")]
    ItemNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type WishlistResult<T> = Result<T, WishlistError>;

impl From<WishlistError> for AppError {
    fn from(err: WishlistError) -> Self {
        match err {
            e @ (WishlistError::ProductNotFound(_) | WishlistError::ItemNotFound(_)) => {
                AppError::NotFound(e.to_string())
            }
            e @ WishlistError::AlreadyInWishlist => AppError::Conflict(e.to_string()),
            WishlistError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for WishlistError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
