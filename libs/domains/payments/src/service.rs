use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{CreatePayment, Payment, PaymentFilter, UpdatePayment};
use crate::repository::PaymentRepository;

pub struct PaymentService<R: PaymentRepository> {
    repository: Arc<R>,
}

impl<R: PaymentRepository> PaymentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Record a payment for one of the caller's orders
    #[instrument(skip(self, input), fields(user_id = %principal.id, order_id = %input.order_id))]
    pub async fn create(
        &self,
        principal: Principal,
        input: CreatePayment,
    ) -> PaymentResult<Payment> {
        let owner = self.repository.order_owner(input.order_id).await?;
        if owner != Some(principal.id) {
            return Err(PaymentError::OrderNotFound(input.order_id));
        }

        self.repository
            .create(Payment::new(principal.id, input))
            .await
    }

    pub async fn list(
        &self,
        principal: Principal,
        filter: PaymentFilter,
    ) -> PaymentResult<Vec<Payment>> {
        principal.require_admin()?;
        self.repository.list(filter.order_id).await
    }

    pub async fn my_payments(&self, principal: Principal) -> PaymentResult<Vec<Payment>> {
        self.repository.list_by_user(principal.id).await
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> PaymentResult<Payment> {
        self.repository
            .get_by_id(id)
            .await?
            .filter(|payment| principal.can_access(payment.user_id))
            .ok_or(PaymentError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(payment_id = %id))]
    pub async fn update(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdatePayment,
    ) -> PaymentResult<Payment> {
        principal.require_admin()?;

        let mut payment = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        if let Some(status) = input.status {
            if !payment.status.can_transition_to(status) {
                return Err(PaymentError::InvalidTransition {
                    from: payment.status,
                    to: status,
                });
            }
        }

        payment.apply_update(input);
        self.repository.update(payment).await
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn delete(&self, principal: Principal, id: Uuid) -> PaymentResult<()> {
        principal.require_admin()?;

        if !self.repository.delete(id).await? {
            return Err(PaymentError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use crate::repository::MockPaymentRepository;

    fn create_input(order_id: Uuid, status: PaymentStatus) -> CreatePayment {
        CreatePayment {
            order_id,
            amount: 300.0,
            method: "credit_card".to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn test_create_for_foreign_order_is_not_found() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_order_owner()
            .returning(|_| Ok(Some(Uuid::now_v7())));
        repo.expect_create().never();

        let service = PaymentService::new(repo);
        let result = service
            .create(
                Principal::user(Uuid::now_v7()),
                create_input(Uuid::now_v7(), PaymentStatus::Pending),
            )
            .await;

        assert!(matches!(result, Err(PaymentError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_completed_sets_paid_at() {
        let user_id = Uuid::now_v7();
        let order_id = Uuid::now_v7();

        let mut repo = MockPaymentRepository::new();
        repo.expect_order_owner()
            .returning(move |_| Ok(Some(user_id)));
        repo.expect_create()
            .withf(move |payment| payment.user_id == user_id && payment.paid_at.is_some())
            .returning(Ok);

        let service = PaymentService::new(repo);
        let payment = service
            .create(
                Principal::user(user_id),
                create_input(order_id, PaymentStatus::Completed),
            )
            .await
            .unwrap();

        assert_eq!(payment.order_id, order_id);
        assert_eq!(payment.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn test_refunded_payment_cannot_reopen() {
        let user_id = Uuid::now_v7();
        let mut payment = Payment::new(
            user_id,
            create_input(Uuid::now_v7(), PaymentStatus::Completed),
        );
        payment.status = PaymentStatus::Refunded;

        let mut repo = MockPaymentRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(payment.clone())));
        repo.expect_update().never();

        let service = PaymentService::new(repo);
        let result = service
            .update(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                UpdatePayment {
                    status: Some(PaymentStatus::Pending),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::InvalidTransition {
                from: PaymentStatus::Refunded,
                to: PaymentStatus::Pending
            })
        ));
    }

    #[tokio::test]
    async fn test_completing_keeps_original_paid_at() {
        let payment = Payment::new(
            Uuid::now_v7(),
            create_input(Uuid::now_v7(), PaymentStatus::Completed),
        );
        let paid_at = payment.paid_at;

        let mut repo = MockPaymentRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(payment.clone())));
        repo.expect_update()
            .withf(move |updated| updated.paid_at == paid_at)
            .returning(Ok);

        let service = PaymentService::new(repo);
        let updated = service
            .update(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                UpdatePayment {
                    status: Some(PaymentStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.paid_at, paid_at);
    }

    #[tokio::test]
    async fn test_other_users_payment_is_hidden() {
        let payment = Payment::new(
            Uuid::now_v7(),
            create_input(Uuid::now_v7(), PaymentStatus::Pending),
        );

        let mut repo = MockPaymentRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(payment.clone())));

        let service = PaymentService::new(repo);
        let result = service
            .get(Principal::user(Uuid::now_v7()), Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(PaymentError::NotFound(_))));
    }
}
