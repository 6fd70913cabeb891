//! Sea-ORM entity for the `payments` table

use sea_orm::entity::prelude::*;

use crate::models::PaymentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTimeWithTimeZone>,
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

impl From<Model> for crate::models::Payment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            user_id: model.user_id,
            amount: model.amount,
            method: model.method,
            status: model.status,
            paid_at: model.paid_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Payment> for ActiveModel {
    fn from(payment: crate::models::Payment) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(payment.id),
            order_id: Set(payment.order_id),
            user_id: Set(payment.user_id),
            amount: Set(payment.amount),
            method: Set(payment.method),
            status: Set(payment.status),
            paid_at: Set(payment.paid_at.map(Into::into)),
            created_at: Set(payment.created_at.into()),
            updated_at: Set(payment.updated_at.into()),
        }
    }
}
