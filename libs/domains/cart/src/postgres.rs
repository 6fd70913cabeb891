use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_catalog::entity::product;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, Statement,
};
use uuid::Uuid;

use crate::{
    entity as cart,
    error::{CartError, CartResult},
    models::{CartItem, CartLine, MAX_CART_QUANTITY},
    repository::CartRepository,
};

#[derive(Debug, FromQueryResult)]
struct CartLineRow {
    id: Uuid,
    product_id: Uuid,
    product_name: String,
    price: f64,
    discount: f64,
    quantity: i32,
    added_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            price: row.price,
            discount: row.discount,
            quantity: row.quantity,
            subtotal: CartLine::subtotal_of(row.price, row.discount, row.quantity),
            added_at: row.added_at,
        }
    }
}

pub struct PgCartRepository {
    db: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn product_exists(&self, product_id: Uuid) -> CartResult<bool> {
        let count = product::Entity::find_by_id(product_id)
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn lines(&self, user_id: Uuid) -> CartResult<Vec<CartLine>> {
        let rows = CartLineRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT c.id, c.product_id, p.name AS product_name, p.price, p.discount,
                   c.quantity, c.added_at
            FROM carts c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.added_at, c.id
            "#,
            [user_id.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> CartResult<CartItem> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            INSERT INTO carts (id, user_id, product_id, quantity, added_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = carts.quantity + EXCLUDED.quantity
            WHERE carts.quantity + EXCLUDED.quantity <= $5
            RETURNING id, user_id, product_id, quantity, added_at
            "#,
            [
                Uuid::now_v7().into(),
                user_id.into(),
                product_id.into(),
                quantity.into(),
                MAX_CART_QUANTITY.into(),
            ],
        );

        // No row back means the conflict update was skipped by the limit guard
        let model = cart::Model::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or(CartError::QuantityLimitExceeded(product_id))?;

        tracing::info!(user_id = %user_id, product_id = %product_id, quantity = model.quantity, "Cart item saved");
        Ok(model.into())
    }

    async fn set_quantity(
        &self,
        user_id: Uuid,
        id: Uuid,
        quantity: i32,
    ) -> CartResult<Option<CartItem>> {
        let Some(model) = cart::Entity::find_by_id(id)
            .filter(cart::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.quantity = Set(quantity);
        let model = active_model.update(&self.db).await?;

        Ok(Some(model.into()))
    }

    async fn remove(&self, user_id: Uuid, id: Uuid) -> CartResult<bool> {
        let result = cart::Entity::delete_many()
            .filter(cart::Column::Id.eq(id))
            .filter(cart::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn clear(&self, user_id: Uuid) -> CartResult<u64> {
        let result = cart::Entity::delete_many()
            .filter(cart::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        tracing::info!(user_id = %user_id, removed = result.rows_affected, "Cleared cart");
        Ok(result.rows_affected)
    }
}
