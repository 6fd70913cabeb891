use async_trait::async_trait;
use domain_orders::entity::order;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, sea_query::NullOrdering,
};
use uuid::Uuid;

use crate::{entity, error::ShipmentResult, models::Shipment, repository::ShipmentRepository};

pub struct PgShipmentRepository {
    db: DatabaseConnection,
}

impl PgShipmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShipmentRepository for PgShipmentRepository {
    async fn order_exists(&self, order_id: Uuid) -> ShipmentResult<bool> {
        let count = order::Entity::find_by_id(order_id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn create(&self, shipment: Shipment) -> ShipmentResult<Shipment> {
        let active_model: entity::ActiveModel = shipment.into();
        let model = active_model.insert(&self.db).await?;
        tracing::info!(
            shipment_id = %model.id,
            order_id = %model.order_id,
            status = %model.status,
            "Created shipment"
        );
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ShipmentResult<Option<Shipment>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> ShipmentResult<Option<Shipment>> {
        let model = entity::Entity::find()
            .filter(entity::Column::TrackingNumber.eq(tracking_number))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, order_id: Option<Uuid>) -> ShipmentResult<Vec<Shipment>> {
        let mut query = entity::Entity::find();
        if let Some(order_id) = order_id {
            query = query.filter(entity::Column::OrderId.eq(order_id));
        }
        let models = query
            .order_by_with_nulls(entity::Column::ShippedAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, shipment: Shipment) -> ShipmentResult<Shipment> {
        let id = shipment.id;
        let active_model: entity::ActiveModel = shipment.into();
        let model = active_model.update(&self.db).await?;
        tracing::info!(shipment_id = %id, status = %model.status, "Updated shipment");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> ShipmentResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(shipment_id = %id, "Deleted shipment");
        }
        Ok(result.rows_affected > 0)
    }
}
