use crate::models::AdminStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub status: AdminStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Admin {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            avatar: model.avatar,
            email: model.email,
            password_hash: model.password_hash,
            status: model.status,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Admin> for ActiveModel {
    fn from(admin: crate::models::Admin) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(admin.id),
            username: Set(admin.username),
            name: Set(admin.name),
            avatar: Set(admin.avatar),
            email: Set(admin.email),
            password_hash: Set(admin.password_hash),
            status: Set(admin.status),
            created_at: Set(admin.created_at.into()),
        }
    }
}
