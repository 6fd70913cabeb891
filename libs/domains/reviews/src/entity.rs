//! Sea-ORM entity for the `reviews` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
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

impl From<Model> for crate::models::Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            user_id: model.user_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Review> for ActiveModel {
    fn from(review: crate::models::Review) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(review.id),
            product_id: Set(review.product_id),
            user_id: Set(review.user_id),
            rating: Set(review.rating),
            comment: Set(review.comment),
            created_at: Set(review.created_at.into()),
        }
    }
}
