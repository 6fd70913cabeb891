use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Upper bound for a single cart row, after merging.
/// The `range` validators below repeat this value.
pub const MAX_CART_QUANTITY: i32 = 1000;

/// One cart row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Cart row joined with the product's current name and pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub price: f64,
    pub discount: f64,
    pub quantity: i32,
    /// `(price - discount) * quantity`
    pub subtotal: f64,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    pub fn subtotal_of(price: f64, discount: f64, quantity: i32) -> f64 {
        (price - discount) * f64::from(quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: f64,
}

impl From<Vec<CartLine>> for CartView {
    fn from(items: Vec<CartLine>) -> Self {
        let total = items.iter().fold(0.0, |total, line| total + line.subtotal);
        Self { items, total }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToCart {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItem {
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, discount: f64, quantity: i32) -> CartLine {
        CartLine {
            id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            product_name: "Desk Lamp".to_string(),
            price,
            discount,
            quantity,
            subtotal: CartLine::subtotal_of(price, discount, quantity),
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_view_total_sums_discounted_subtotals() {
        let view = CartView::from(vec![line(100.0, 10.0, 2), line(5.5, 0.0, 4)]);
        assert_eq!(view.items[0].subtotal, 180.0);
        assert_eq!(view.total, 202.0);
    }

    #[test]
    fn test_empty_view_total_is_zero() {
        assert_eq!(CartView::from(vec![]).total, 0.0);
    }

    #[test]
    fn test_zero_quantity_fails_validation() {
        let input = AddToCart {
            product_id: Uuid::now_v7(),
            quantity: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_quantity_above_limit_fails_validation() {
        let input = UpdateCartItem {
            quantity: MAX_CART_QUANTITY + 1,
        };
        assert!(input.validate().is_err());
        assert!(UpdateCartItem { quantity: MAX_CART_QUANTITY }.validate().is_ok());
    }
}
