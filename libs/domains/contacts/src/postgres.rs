use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{entity, error::ContactResult, models::Contact, repository::ContactRepository};

pub struct PgContactRepository {
    db: DatabaseConnection,
}

impl PgContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, contact: Contact) -> ContactResult<Contact> {
        let active_model: entity::ActiveModel = contact.into();
        let model = active_model.insert(&self.db).await?;
        tracing::info!(
            contact_id = %model.id,
            contact_type = %model.contact_type,
            "Received contact message"
        );
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ContactResult<Option<Contact>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ContactResult<Vec<Contact>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::SubmittedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> ContactResult<Vec<Contact>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::SubmittedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, contact: Contact) -> ContactResult<Contact> {
        let id = contact.id;
        let active_model: entity::ActiveModel = contact.into();
        let model = active_model.update(&self.db).await?;
        tracing::info!(contact_id = %id, status = %model.status, "Updated contact message");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> ContactResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(contact_id = %id, "Deleted contact message");
        }
        Ok(result.rows_affected > 0)
    }
}
