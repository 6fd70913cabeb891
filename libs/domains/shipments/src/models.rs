use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Shipment lifecycle.
///
/// - `pending` to `shipped` or straight to `delivered`
/// - `shipped` to `delivered` or `returned`
/// - `delivered` to `returned`
///
/// `returned` is terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "shipment_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShipmentStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "returned")]
    Returned,
}

impl ShipmentStatus {
    pub fn is_terminal(self) -> bool {
        self == Self::Returned
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use ShipmentStatus::*;

        self == next
            || matches!(
                (self, next),
                (Pending, Shipped | Delivered)
                    | (Shipped, Delivered | Returned)
                    | (Delivered, Returned)
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Shipment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub carrier: Option<String>,
    /// Unique across shipments when present
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    pub fn new(input: CreateShipment) -> Self {
        let now = Utc::now();
        let mut shipment = Self {
            id: Uuid::now_v7(),
            order_id: input.order_id,
            carrier: input.carrier,
            tracking_number: input.tracking_number,
            status: input.status,
            shipped_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };
        shipment.stamp(now);
        shipment
    }

    /// Apply an already validated update
    pub fn apply_update(&mut self, update: UpdateShipment) {
        let now = Utc::now();
        if let Some(carrier) = update.carrier {
            self.carrier = Some(carrier);
        }
        if let Some(tracking_number) = update.tracking_number {
            self.tracking_number = Some(tracking_number);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.stamp(now);
        self.updated_at = now;
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        match self.status {
            ShipmentStatus::Shipped => {
                self.shipped_at.get_or_insert(now);
            }
            ShipmentStatus::Delivered => {
                self.delivered_at.get_or_insert(now);
                self.shipped_at.get_or_insert(now);
            }
            ShipmentStatus::Pending | ShipmentStatus::Returned => {}
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateShipment {
    pub order_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub carrier: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub status: ShipmentStatus,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShipment {
    #[validate(length(min = 1, max = 100))]
    pub carrier: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub tracking_number: Option<String>,
    pub status: Option<ShipmentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShipmentFilter {
    /// Only shipments for this order
    #[serde(alias = "orderId")]
    pub order_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(status: ShipmentStatus) -> CreateShipment {
        CreateShipment {
            order_id: Uuid::now_v7(),
            carrier: Some("DHL".to_string()),
            tracking_number: Some("DHL123456789".to_string()),
            status,
        }
    }

    #[test]
    fn test_transitions() {
        use ShipmentStatus::*;

        assert!(Pending.can_transition_to(Shipped));
        assert!(Pending.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Returned));
        assert!(Delivered.can_transition_to(Returned));

        assert!(!Pending.can_transition_to(Returned));
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(!Returned.can_transition_to(Pending));
        assert!(Returned.is_terminal());
    }

    #[test]
    fn test_delivery_backfills_shipped_at() {
        let mut shipment = Shipment::new(create(ShipmentStatus::Pending));
        assert!(shipment.shipped_at.is_none());

        shipment.apply_update(UpdateShipment {
            status: Some(ShipmentStatus::Delivered),
            ..Default::default()
        });

        assert!(shipment.delivered_at.is_some());
        assert_eq!(shipment.shipped_at, shipment.delivered_at);
    }

    #[test]
    fn test_existing_shipped_at_is_kept() {
        let mut shipment = Shipment::new(create(ShipmentStatus::Shipped));
        let shipped_at = shipment.shipped_at;
        assert!(shipped_at.is_some());

        shipment.apply_update(UpdateShipment {
            status: Some(ShipmentStatus::Delivered),
            ..Default::default()
        });

        assert_eq!(shipment.shipped_at, shipped_at);
        assert!(shipment.delivered_at.is_some());
    }

    #[test]
    fn test_empty_tracking_number_is_rejected() {
        let mut input = create(ShipmentStatus::Pending);
        input.tracking_number = Some(String::new());
        assert!(input.validate().is_err());
    }
}
