use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Order lifecycle.
///
/// - `pending` to `processing`, `shipped` or `cancelled`
/// - `processing` to `shipped` or `cancelled`
/// - `shipped` to `delivered`
///
/// `delivered` and `cancelled` are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Staying in the current status is always allowed
    pub fn can_transition_to(self, next: Self) -> bool {
        use OrderStatus::*;

        self == next
            || matches!(
                (self, next),
                (Pending, Processing | Shipped | Cancelled)
                    | (Processing, Shipped | Cancelled)
                    | (Shipped, Delivered)
            )
    }
}

/// Persisted order with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    /// Fixed at placement time
    pub total_amount: f64,
    pub payment_method: String,
    pub shipping_method: String,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Line item; price and discount are copied at placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: f64,
    pub discount: f64,
}

/// One requested line of an explicit order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_line_discount"))]
pub struct OrderLine {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub discount: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        (self.price - self.discount) * f64::from(self.quantity)
    }
}

fn validate_line_discount(line: &OrderLine) -> Result<(), ValidationError> {
    if line.discount > line.price {
        return Err(ValidationError::new("discount_exceeds_price"));
    }
    Ok(())
}

/// Payment and delivery details shared by both placement variants
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct ShippingDetails {
    #[validate(length(min = 1, max = 100))]
    pub payment_method: String,
    #[validate(length(min = 1, max = 100))]
    pub shipping_method: String,
    #[validate(length(min = 1))]
    pub shipping_address: String,
}

/// Explicit order placement.
///
/// New orders always start as `pending`; a `status` sent in the body is
/// ignored. Use `PATCH /orders/{id}` to move an order along.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[serde(flatten)]
    #[validate(nested)]
    pub details: ShippingDetails,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Everything needed to persist an order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_id: Uuid,
    pub details: ShippingDetails,
    pub lines: Vec<OrderLine>,
}

impl OrderDraft {
    /// Sum of `(price - discount) * quantity` over all lines
    pub fn total_amount(&self) -> f64 {
        self.lines.iter().fold(0.0, |total, line| total + line.line_total())
    }

    /// Lines ordered by product id so concurrent placements lock rows in
    /// the same order
    pub fn sorted_lines(&self) -> Vec<OrderLine> {
        let mut lines = self.lines.clone();
        lines.sort_by_key(|line| line.product_id);
        lines
    }
}
