//! Sea-ORM entity for the `shipments` table

use sea_orm::entity::prelude::*;

use crate::models::ShipmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub carrier: Option<String>,
    #[sea_orm(unique)]
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    pub shipped_at: Option<DateTimeWithTimeZone>,
    pub delivered_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_orders::entity::order::Entity",
        from = "Column::OrderId",
        to = "domain_orders::entity::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<domain_orders::entity::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Shipment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            carrier: model.carrier,
            tracking_number: model.tracking_number,
            status: model.status,
            shipped_at: model.shipped_at.map(Into::into),
            delivered_at: model.delivered_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Shipment> for ActiveModel {
    fn from(shipment: crate::models::Shipment) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(shipment.id),
            order_id: Set(shipment.order_id),
            carrier: Set(shipment.carrier),
            tracking_number: Set(shipment.tracking_number),
            status: Set(shipment.status),
            shipped_at: Set(shipment.shipped_at.map(Into::into)),
            delivered_at: Set(shipment.delivered_at.map(Into::into)),
            created_at: Set(shipment.created_at.into()),
            updated_at: Set(shipment.updated_at.into()),
        }
    }
}
