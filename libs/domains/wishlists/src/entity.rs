//! Sea-ORM entity for the `wishlists` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wishlists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_catalog::entity::product::Entity",
        from = "Column::ProductId",
        to = "domain_catalog::entity::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<domain_catalog::entity::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::WishlistItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::WishlistItem> for ActiveModel {
    fn from(item: crate::models::WishlistItem) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(item.id),
            user_id: Set(item.user_id),
            product_id: Set(item.product_id),
            created_at: Set(item.created_at.into()),
        }
    }
}
