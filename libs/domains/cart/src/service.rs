use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem, CartView, UpdateCartItem};
use crate::repository::CartRepository;

/// Every operation acts on the caller's own cart
pub struct CartService<R: CartRepository> {
    repository: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn view(&self, principal: Principal) -> CartResult<CartView> {
        let lines = self.repository.lines(principal.id).await?;
        Ok(CartView::from(lines))
    }

    #[instrument(skip(self, input), fields(user_id = %principal.id, product_id = %input.product_id))]
    pub async fn add(&self, principal: Principal, input: AddToCart) -> CartResult<CartItem> {
        if !self.repository.product_exists(input.product_id).await? {
            return Err(CartError::ProductNotFound(input.product_id));
        }

        self.repository
            .add(principal.id, input.product_id, input.quantity)
            .await
    }

    #[instrument(skip(self, input), fields(user_id = %principal.id, item_id = %id))]
    pub async fn update(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateCartItem,
    ) -> CartResult<CartItem> {
        self.repository
            .set_quantity(principal.id, id, input.quantity)
            .await?
            .ok_or(CartError::ItemNotFound(id))
    }

    #[instrument(skip(self), fields(user_id = %principal.id, item_id = %id))]
    pub async fn remove(&self, principal: Principal, id: Uuid) -> CartResult<()> {
        if !self.repository.remove(principal.id, id).await? {
            return Err(CartError::ItemNotFound(id));
        }
        Ok(())
    }

    pub async fn clear(&self, principal: Principal) -> CartResult<u64> {
        self.repository.clear(principal.id).await
    }
}
