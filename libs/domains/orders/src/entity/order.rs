use sea_orm::entity::prelude::*;

use crate::models::OrderStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,
    pub payment_method: String,
    pub shipping_method: String,
    #[sea_orm(column_type = "Text")]
    pub shipping_address: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_order(self, items: Vec<crate::models::OrderItem>) -> crate::models::Order {
        crate::models::Order {
            id: self.id,
            user_id: self.user_id,
            status: self.status,
            total_amount: self.total_amount,
            payment_method: self.payment_method,
            shipping_method: self.shipping_method,
            shipping_address: self.shipping_address,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
            items,
        }
    }
}
