use async_trait::async_trait;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{Order, OrderDraft, OrderStatus, ShippingDetails};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Decrement stock for every line and persist the order in one
    /// transaction. Fails with `ProductNotFound` or `InsufficientStock`
    /// for the first offending line in the draft's order, without side
    /// effects.
    async fn place(&self, draft: OrderDraft) -> OrderResult<Order>;

    /// Like [`OrderRepository::place`] with lines read from the user's cart at
    /// current product prices; the cart rows read are deleted in the same
    /// transaction. Fails with `EmptyCart` when there is nothing to order.
    async fn place_from_cart(
        &self,
        user_id: Uuid,
        details: ShippingDetails,
    ) -> OrderResult<Order>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// Newest first; all users when `user_id` is `None`
    async fn list(&self, user_id: Option<Uuid>) -> OrderResult<Vec<Order>>;

    /// Set `to` only if the order is still in `from`. Returns false otherwise.
    async fn update_status(&self, id: Uuid, from: OrderStatus, to: OrderStatus)
    -> OrderResult<bool>;

    /// Items, payments and shipments go with it
    async fn delete(&self, id: Uuid) -> OrderResult<bool>;
}
