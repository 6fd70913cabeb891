//! Sea-ORM entity for the `contacts` table

use sea_orm::entity::prelude::*;

use crate::models::{ContactStatus, ContactType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_name = "type")]
    pub contact_type: ContactType,
    pub status: ContactStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub user_id: Option<Uuid>,
    pub submitted_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Contact {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            subject: model.subject,
            message: model.message,
            contact_type: model.contact_type,
            status: model.status,
            response: model.response,
            user_id: model.user_id,
            submitted_at: model.submitted_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Contact> for ActiveModel {
    fn from(contact: crate::models::Contact) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(contact.id),
            name: Set(contact.name),
            email: Set(contact.email),
            phone: Set(contact.phone),
            subject: Set(contact.subject),
            message: Set(contact.message),
            contact_type: Set(contact.contact_type),
            status: Set(contact.status),
            response: Set(contact.response),
            user_id: Set(contact.user_id),
            submitted_at: Set(contact.submitted_at.into()),
            updated_at: Set(contact.updated_at.into()),
        }
    }
}
