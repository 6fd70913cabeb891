use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ShipmentResult;
use crate::models::Shipment;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn order_exists(&self, order_id: Uuid) -> ShipmentResult<bool>;

    async fn create(&self, shipment: Shipment) -> ShipmentResult<Shipment>;

    async fn get_by_id(&self, id: Uuid) -> ShipmentResult<Option<Shipment>>;

    async fn find_by_tracking_number(&self, tracking_number: &str)
    -> ShipmentResult<Option<Shipment>>;

    /// Most recently shipped first, unshipped last
    async fn list(&self, order_id: Option<Uuid>) -> ShipmentResult<Vec<Shipment>>;

    async fn update(&self, shipment: Shipment) -> ShipmentResult<Shipment>;

    async fn delete(&self, id: Uuid) -> ShipmentResult<bool>;
}
