use async_trait::async_trait;
use domain_orders::entity::order;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Select, sea_query::NullOrdering,
};
use uuid::Uuid;

use crate::{entity, error::PaymentResult, models::Payment, repository::PaymentRepository};

fn newest_paid_first(query: Select<entity::Entity>) -> Select<entity::Entity> {
    query
        .order_by_with_nulls(entity::Column::PaidAt, Order::Desc, NullOrdering::Last)
        .order_by_desc(entity::Column::CreatedAt)
}

pub struct PgPaymentRepository {
    db: DatabaseConnection,
}

impl PgPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn order_owner(&self, order_id: Uuid) -> PaymentResult<Option<Uuid>> {
        let owner = order::Entity::find_by_id(order_id)
            .select_only()
            .column(order::Column::UserId)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await?;
        Ok(owner)
    }

    async fn create(&self, payment: Payment) -> PaymentResult<Payment> {
        let active_model: entity::ActiveModel = payment.into();
        let model = active_model.insert(&self.db).await?;
        tracing::info!(
            payment_id = %model.id,
            order_id = %model.order_id,
            status = %model.status,
            "Created payment"
        );
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> PaymentResult<Option<Payment>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, order_id: Option<Uuid>) -> PaymentResult<Vec<Payment>> {
        let mut query = entity::Entity::find();
        if let Some(order_id) = order_id {
            query = query.filter(entity::Column::OrderId.eq(order_id));
        }
        let models = newest_paid_first(query).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> PaymentResult<Vec<Payment>> {
        let models =
            newest_paid_first(entity::Entity::find().filter(entity::Column::UserId.eq(user_id)))
                .all(&self.db)
                .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, payment: Payment) -> PaymentResult<Payment> {
        let id = payment.id;
        let active_model: entity::ActiveModel = payment.into();
        let model = active_model.update(&self.db).await?;
        tracing::info!(payment_id = %id, status = %model.status, "Updated payment");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> PaymentResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(payment_id = %id, "Deleted payment");
        }
        Ok(result.rows_affected > 0)
    }
}
