use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ShipmentError, ShipmentResult};
use crate::models::{CreateShipment, Shipment, ShipmentFilter, UpdateShipment};
use crate::repository::ShipmentRepository;

pub struct ShipmentService<R: ShipmentRepository> {
    repository: Arc<R>,
}

impl<R: ShipmentRepository> ShipmentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(order_id = %input.order_id))]
    pub async fn create(
        &self,
        principal: Principal,
        input: CreateShipment,
    ) -> ShipmentResult<Shipment> {
        principal.require_admin()?;

        if !self.repository.order_exists(input.order_id).await? {
            return Err(ShipmentError::OrderNotFound(input.order_id));
        }

        self.repository.create(Shipment::new(input)).await
    }

    pub async fn list(
        &self,
        principal: Principal,
        filter: ShipmentFilter,
    ) -> ShipmentResult<Vec<Shipment>> {
        principal.require_admin()?;
        self.repository.list(filter.order_id).await
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> ShipmentResult<Shipment> {
        principal.require_admin()?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ShipmentError::NotFound(id))
    }

    /// Public lookup by tracking number
    pub async fn track(&self, tracking_number: &str) -> ShipmentResult<Shipment> {
        self.repository
            .find_by_tracking_number(tracking_number)
            .await?
            .ok_or_else(|| ShipmentError::TrackingNotFound(tracking_number.to_string()))
    }

    #[instrument(skip(self, input), fields(shipment_id = %id))]
    pub async fn update(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateShipment,
    ) -> ShipmentResult<Shipment> {
        principal.require_admin()?;

        let mut shipment = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ShipmentError::NotFound(id))?;

        if let Some(status) = input.status {
            if !shipment.status.can_transition_to(status) {
                return Err(ShipmentError::InvalidTransition {
                    from: shipment.status,
                    to: status,
                });
            }
        }

        shipment.apply_update(input);
        self.repository.update(shipment).await
    }

    #[instrument(skip(self), fields(shipment_id = %id))]
    pub async fn delete(&self, principal: Principal, id: Uuid) -> ShipmentResult<()> {
        principal.require_admin()?;

        if !self.repository.delete(id).await? {
            return Err(ShipmentError::NotFound(id));
        }
        Ok(())
    }
}
