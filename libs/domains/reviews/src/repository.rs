use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ReviewResult;
use crate::models::Review;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn product_exists(&self, product_id: Uuid) -> ReviewResult<bool>;

    async fn has_reviewed(&self, user_id: Uuid, product_id: Uuid) -> ReviewResult<bool>;

    async fn create(&self, review: Review) -> ReviewResult<Review>;

    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>>;

    /// Newest first
    async fn list(&self, product_id: Option<Uuid>) -> ReviewResult<Vec<Review>>;

    /// Newest first
    async fn list_by_user(&self, user_id: Uuid) -> ReviewResult<Vec<Review>>;

    async fn update(&self, review: Review) -> ReviewResult<Review>;

    async fn delete(&self, id: Uuid) -> ReviewResult<bool>;
}
