use axum::response::{IntoResponse, Response};
use axum_helpers::{AdminRequired, AppError, ErrorCode};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ShipmentStatus;

#[derive(Debug, Error)]
pub enum ShipmentError {
    #[error("Shipment not found: {0}")]
    NotFound(Uuid),

    #[error("Shipment with tracking number {0} not found")]
    TrackingNotFound(String),

    #[error("Order with ID {0} not found")]
    OrderNotFound(Uuid),

    #[error("Cannot change shipment status from {from} to {to}")]
    InvalidTransition {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    #[error("{0}")]
    Forbidden(#[from] AdminRequired),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ShipmentResult<T> = Result<T, ShipmentError>;

impl From<ShipmentError> for AppError {
    fn from(err: ShipmentError) -> Self {
        match err {
            ShipmentError::NotFound(id) => {
                AppError::NotFound(format!("Shipment with ID {} not found", id))
            }
            e @ (ShipmentError::TrackingNotFound(_) | ShipmentError::OrderNotFound(_)) => {
                AppError::NotFound(e.to_string())
            }
            e @ ShipmentError::InvalidTransition { .. } => {
                AppError::rule(ErrorCode::InvalidStatusTransition, e.to_string())
            }
            ShipmentError::Forbidden(e) => AppError::Forbidden(e.to_string()),
            ShipmentError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ShipmentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
