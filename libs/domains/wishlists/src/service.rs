use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{WishlistError, WishlistResult};
use crate::models::{AddToWishlist, WishlistCheck, WishlistEntry, WishlistItem};
use crate::repository::WishlistRepository;

/// Every operation acts on the caller's own wishlist
pub struct WishlistService<R: WishlistRepository> {
    repository: Arc<R>,
}

impl<R: WishlistRepository> WishlistService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list(&self, principal: Principal) -> WishlistResult<Vec<WishlistEntry>> {
        self.repository.entries(principal.id).await
    }

    #[instrument(skip(self, input), fields(user_id = %principal.id, product_id = %input.product_id))]
    pub async fn add(
        &self,
        principal: Principal,
        input: AddToWishlist,
    ) -> WishlistResult<WishlistItem> {
        if !self.repository.product_exists(input.product_id).await? {
            return Err(WishlistError::ProductNotFound(input.product_id));
        }

        if self
            .repository
            .contains(principal.id, input.product_id)
            .await?
        {
            return Err(WishlistError::AlreadyInWishlist);
        }

        self.repository
            .add(WishlistItem::new(principal.id, input.product_id))
            .await
    }

    pub async fn check(
        &self,
        principal: Principal,
        product_id: Uuid,
    ) -> WishlistResult<WishlistCheck> {
        let in_wishlist = self.repository.contains(principal.id, product_id).await?;
        Ok(WishlistCheck { in_wishlist })
    }

    #[instrument(skip(self), fields(user_id = %principal.id, item_id = %id))]
    pub async fn remove(&self, principal: Principal, id: Uuid) -> WishlistResult<()> {
        if !self.repository.remove(principal.id, id).await? {
            return Err(WishlistError::ItemNotFound(id));
        }
        Ok(())
    }

    pub async fn clear(&self, principal: Principal) -> WishlistResult<u64> {
        self.repository.clear(principal.id).await
    }
}
