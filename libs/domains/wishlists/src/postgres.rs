use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_catalog::entity::product;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, Statement,
};
use uuid::Uuid;

use crate::{
    entity,
    error::WishlistResult,
    models::{WishlistEntry, WishlistItem},
    repository::WishlistRepository,
};

#[derive(Debug, FromQueryResult)]
struct WishlistEntryRow {
    id: Uuid,
    product_id: Uuid,
    product_name: String,
    price: f64,
    discount: f64,
    stock: i32,
    created_at: DateTime<Utc>,
}

impl From<WishlistEntryRow> for WishlistEntry {
    fn from(row: WishlistEntryRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            price: row.price,
            discount: row.discount,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

pub struct PgWishlistRepository {
    db: DatabaseConnection,
}

impl PgWishlistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WishlistRepository for PgWishlistRepository {
    async fn product_exists(&self, product_id: Uuid) -> WishlistResult<bool> {
        let count = product::Entity::find_by_id(product_id)
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn contains(&self, user_id: Uuid, product_id: Uuid) -> WishlistResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn entries(&self, user_id: Uuid) -> WishlistResult<Vec<WishlistEntry>> {
        let rows = WishlistEntryRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT w.id, w.product_id, p.name AS product_name, p.price, p.discount,
                   p.stock, w.created_at
            FROM wishlists w
            JOIN products p ON p.id = w.product_id
            WHERE w.user_id = $1
            ORDER BY w.created_at DESC, w.id DESC
            "#,
            [user_id.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add(&self, item: WishlistItem) -> WishlistResult<WishlistItem> {
        let active_model: entity::ActiveModel = item.into();
        let model = active_model.insert(&self.db).await?;
        tracing::info!(
            user_id = %model.user_id,
            product_id = %model.product_id,
            "Added product to wishlist"
        );
        Ok(model.into())
    }

    async fn remove(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn clear(&self, user_id: Uuid) -> WishlistResult<u64> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        tracing::info!(user_id = %user_id, removed = result.rows_affected, "Cleared wishlist");
        Ok(result.rows_affected)
    }
}
