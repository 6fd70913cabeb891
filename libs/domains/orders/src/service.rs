use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderDraft, OrderStatus, ShippingDetails};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Place an order from explicit line items
    #[instrument(skip(self, input), fields(user_id = %principal.id, lines = input.items.len()))]
    pub async fn place(&self, principal: Principal, input: CreateOrder) -> OrderResult<Order> {
        let draft = OrderDraft {
            user_id: principal.id,
            details: input.details,
            lines: input.items,
        };
        self.repository.place(draft).await
    }

    /// Place an order from everything in the caller's cart
    #[instrument(skip(self, details), fields(user_id = %principal.id))]
    pub async fn place_from_cart(
        &self,
        principal: Principal,
        details: ShippingDetails,
    ) -> OrderResult<Order> {
        self.repository.place_from_cart(principal.id, details).await
    }

    pub async fn list_all(&self, principal: Principal) -> OrderResult<Vec<Order>> {
        principal.require_admin()?;
        self.repository.list(None).await
    }

    pub async fn my_orders(&self, principal: Principal) -> OrderResult<Vec<Order>> {
        self.repository.list(Some(principal.id)).await
    }

    /// Other users' orders look missing rather than forbidden
    pub async fn get(&self, principal: Principal, id: Uuid) -> OrderResult<Order> {
        self.repository
            .get_by_id(id)
            .await?
            .filter(|order| principal.can_access(order.user_id))
            .ok_or(OrderError::OrderNotFound(id))
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn update_status(
        &self,
        principal: Principal,
        id: Uuid,
        status: OrderStatus,
    ) -> OrderResult<Order> {
        principal.require_admin()?;

        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))?;

        if order.status == status {
            return Ok(order);
        }

        if !order.status.can_transition_to(status) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }

        if !self.repository.update_status(id, order.status, status).await? {
            return Err(OrderError::StatusChanged(id));
        }

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete(&self, principal: Principal, id: Uuid) -> OrderResult<()> {
        principal.require_admin()?;

        if !self.repository.delete(id).await? {
            return Err(OrderError::OrderNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderLine;
    use crate::repository::MockOrderRepository;
    use chrono::Utc;

    fn details() -> ShippingDetails {
        ShippingDetails {
            payment_method: "credit_card".to_string(),
            shipping_method: "standard".to_string(),
            shipping_address: "1 Main St".to_string(),
        }
    }

    fn order(user_id: Uuid, status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::now_v7(),
            user_id,
            status,
            total_amount: 300.0,
            payment_method: "credit_card".to_string(),
            shipping_method: "standard".to_string(),
            shipping_address: "1 Main St".to_string(),
            created_at: now,
            updated_at: now,
            items: vec![],
        }
    }

    #[tokio::test]
    async fn test_place_builds_draft_for_caller() {
        let user_id = Uuid::now_v7();
        let product_id = Uuid::now_v7();

        let mut repo = MockOrderRepository::new();
        repo.expect_place()
            .withf(move |draft| {
                draft.user_id == user_id
                    && draft.lines.len() == 1
                    && draft.total_amount() == 300.0
            })
            .returning(move |draft| {
                let mut placed = order(draft.user_id, OrderStatus::Pending);
                placed.total_amount = draft.total_amount();
                Ok(placed)
            });

        let service = OrderService::new(repo);
        let placed = service
            .place(
                Principal::user(user_id),
                CreateOrder {
                    details: details(),
                    items: vec![OrderLine {
                        product_id,
                        quantity: 3,
                        price: 100.0,
                        discount: 0.0,
                    }],
                },
            )
            .await
            .unwrap();

        assert_eq!(placed.total_amount, 300.0);
    }

    #[tokio::test]
    async fn test_get_other_users_order_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(order(Uuid::now_v7(), OrderStatus::Pending))));

        let service = OrderService::new(repo);
        let result = service
            .get(Principal::user(Uuid::now_v7()), Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_admin_can_read_any_order() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(order(Uuid::now_v7(), OrderStatus::Pending))));

        let service = OrderService::new(repo);
        let result = service
            .get(Principal::admin(Uuid::now_v7()), Uuid::now_v7())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_illegal_transition_is_rejected() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(order(Uuid::now_v7(), OrderStatus::Delivered))));
        repo.expect_update_status().never();

        let service = OrderService::new(repo);
        let result = service
            .update_status(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                OrderStatus::Pending,
            )
            .await;

        assert!(matches!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending
            })
        ));
    }

    #[tokio::test]
    async fn test_same_status_is_noop() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(order(Uuid::now_v7(), OrderStatus::Shipped))));
        repo.expect_update_status().never();

        let service = OrderService::new(repo);
        let updated = service
            .update_status(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                OrderStatus::Shipped,
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_concurrent_status_change_is_conflict() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(order(Uuid::now_v7(), OrderStatus::Pending))));
        repo.expect_update_status()
            .withf(|_, from, to| *from == OrderStatus::Pending && *to == OrderStatus::Processing)
            .returning(|_, _, _| Ok(false));

        let service = OrderService::new(repo);
        let result = service
            .update_status(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                OrderStatus::Processing,
            )
            .await;

        assert!(matches!(result, Err(OrderError::StatusChanged(_))));
    }

    #[tokio::test]
    async fn test_user_cannot_update_status() {
        let service = OrderService::new(MockOrderRepository::new());
        let result = service
            .update_status(
                Principal::user(Uuid::now_v7()),
                Uuid::now_v7(),
                OrderStatus::Cancelled,
            )
            .await;

        assert!(matches!(result, Err(OrderError::Forbidden(_))));
    }
}
