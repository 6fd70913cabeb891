use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PaymentResult;
use crate::models::Payment;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Owner of the order, `None` when the order does not exist
    async fn order_owner(&self, order_id: Uuid) -> PaymentResult<Option<Uuid>>;

    async fn create(&self, payment: Payment) -> PaymentResult<Payment>;

    async fn get_by_id(&self, id: Uuid) -> PaymentResult<Option<Payment>>;

    /// Most recently paid first, unpaid last
    async fn list(&self, order_id: Option<Uuid>) -> PaymentResult<Vec<Payment>>;

    async fn list_by_user(&self, user_id: Uuid) -> PaymentResult<Vec<Payment>>;

    async fn update(&self, payment: Payment) -> PaymentResult<Payment>;

    async fn delete(&self, id: Uuid) -> PaymentResult<bool>;
}
