use async_trait::async_trait;
use domain_catalog::entity::product;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::{entity, error::ReviewResult, models::Review, repository::ReviewRepository};

pub struct PgReviewRepository {
    db: DatabaseConnection,
}

impl PgReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn product_exists(&self, product_id: Uuid) -> ReviewResult<bool> {
        let count = product::Entity::find_by_id(product_id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn has_reviewed(&self, user_id: Uuid, product_id: Uuid) -> ReviewResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, review: Review) -> ReviewResult<Review> {
        let active_model: entity::ActiveModel = review.into();
        let model = active_model.insert(&self.db).await?;
        tracing::info!(
            review_id = %model.id,
            product_id = %model.product_id,
            rating = model.rating,
            "Created review"
        );
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, product_id: Option<Uuid>) -> ReviewResult<Vec<Review>> {
        let mut query = entity::Entity::find();
        if let Some(product_id) = product_id {
            query = query.filter(entity::Column::ProductId.eq(product_id));
        }
        let models = query
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> ReviewResult<Vec<Review>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, review: Review) -> ReviewResult<Review> {
        let id = review.id;
        let active_model: entity::ActiveModel = review.into();
        let model = active_model.update(&self.db).await?;
        tracing::info!(review_id = %id, "Updated review");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> ReviewResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(review_id = %id, "Deleted review");
        }
        Ok(result.rows_affected > 0)
    }
}
