use async_trait::async_trait;
use uuid::Uuid;

use crate::error::WishlistResult;
use crate::models::{WishlistEntry, WishlistItem};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn product_exists(&self, product_id: Uuid) -> WishlistResult<bool>;

    async fn contains(&self, user_id: Uuid, product_id: Uuid) -> WishlistResult<bool>;

    /// Newest first
    async fn entries(&self, user_id: Uuid) -> WishlistResult<Vec<WishlistEntry>>;

    async fn add(&self, item: WishlistItem) -> WishlistResult<WishlistItem>;

    /// Only removes the row if it belongs to `user_id`
    async fn remove(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool>;

    async fn clear(&self, user_id: Uuid) -> WishlistResult<u64>;
}
