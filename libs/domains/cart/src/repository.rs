use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CartResult;
use crate::models::{CartItem, CartLine};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn product_exists(&self, product_id: Uuid) -> CartResult<bool>;

    /// The user's cart with current product pricing, oldest first
    async fn lines(&self, user_id: Uuid) -> CartResult<Vec<CartLine>>;

    /// Insert the row, or add `quantity` to the existing (user, product) row.
    /// Fails with `QuantityLimitExceeded` when the merged quantity would pass
    /// `MAX_CART_QUANTITY`; the row is left unchanged.
    async fn add(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> CartResult<CartItem>;

    /// `None` when the item does not exist or belongs to someone else
    async fn set_quantity(
        &self,
        user_id: Uuid,
        id: Uuid,
        quantity: i32,
    ) -> CartResult<Option<CartItem>>;

    async fn remove(&self, user_id: Uuid, id: Uuid) -> CartResult<bool>;

    /// Returns the number of rows removed
    async fn clear(&self, user_id: Uuid) -> CartResult<u64>;
}
