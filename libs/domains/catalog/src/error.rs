use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Discount cannot exceed price")]
    DiscountExceedsPrice,

    #[error("A category cannot be its own parent")]
    SelfParent,

    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product with ID {} not found", id))
            }
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category with ID {} not found", id))
            }
            e @ (CatalogError::DiscountExceedsPrice | CatalogError::SelfParent) => {
                AppError::BadRequest(e.to_string())
            }
            CatalogError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
