use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use domain_cart::entity as cart;
use domain_catalog::entity::product;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entity::{order, order_item},
    error::{OrderError, OrderResult},
    models::{Order, OrderDraft, OrderItem, OrderLine, OrderStatus, ShippingDetails},
    repository::OrderRepository,
};

#[derive(Debug, FromQueryResult)]
struct CartSourceRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    price: f64,
    discount: f64,
}

#[derive(Debug, FromQueryResult)]
struct StockRow {
    id: Uuid,
    name: String,
    stock: i32,
}

/// Locks the ordered products (in id order) and checks the lines in the
/// order they were given, so the first bad line decides the error.
/// Repeated products are checked against their running total.
async fn check_stock<C: ConnectionTrait>(conn: &C, draft: &OrderDraft) -> OrderResult<()> {
    let ids: Vec<Uuid> = draft.lines.iter().map(|line| line.product_id).collect();
    let stock: HashMap<Uuid, StockRow> = product::Entity::find()
        .select_only()
        .columns([product::Column::Id, product::Column::Name, product::Column::Stock])
        .filter(product::Column::Id.is_in(ids))
        .order_by_asc(product::Column::Id)
        .lock_exclusive()
        .into_model::<StockRow>()
        .all(conn)
        .await?
        .into_iter()
        .map(|row| (row.id, row))
        .collect();

    let mut requested: HashMap<Uuid, i64> = HashMap::new();
    for line in &draft.lines {
        let Some(row) = stock.get(&line.product_id) else {
            return Err(OrderError::ProductNotFound(line.product_id));
        };
        let total = requested.entry(line.product_id).or_default();
        *total += i64::from(line.quantity);
        if *total > i64::from(row.stock) {
            return Err(OrderError::InsufficientStock {
                product_id: row.id,
                product_name: row.name.clone(),
            });
        }
    }
    Ok(())
}

/// Conditional decrement; a miss is either an unknown product or not enough
/// stock, told apart by a follow-up lookup
async fn decrement_stock<C: ConnectionTrait>(conn: &C, line: &OrderLine) -> OrderResult<()> {
    let result = conn
        .execute_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            UPDATE products
            SET stock = stock - $1, no_of_sell = no_of_sell + $1, updated_at = NOW()
            WHERE id = $2 AND stock >= $1
            "#,
            [line.quantity.into(), line.product_id.into()],
        ))
        .await?;

    if result.rows_affected() > 0 {
        return Ok(());
    }

    let row = conn
        .query_one_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT name FROM products WHERE id = $1",
            [line.product_id.into()],
        ))
        .await?;

    match row {
        None => Err(OrderError::ProductNotFound(line.product_id)),
        Some(row) => Err(OrderError::InsufficientStock {
            product_id: line.product_id,
            product_name: row.try_get("", "name")?,
        }),
    }
}

/// Stock check, stock decrements, order row and item rows. Runs on the caller's
/// transaction.
async fn insert_order<C: ConnectionTrait>(conn: &C, draft: &OrderDraft) -> OrderResult<Order> {
    check_stock(conn, draft).await?;
    for line in draft.sorted_lines() {
        decrement_stock(conn, &line).await?;
    }

    // Postgres keeps microseconds
    let now: DateTime<Utc> = Utc::now().trunc_subsecs(6);
    let order_id = Uuid::now_v7();
    let total_amount = draft.total_amount();

    conn.execute_raw(Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        INSERT INTO orders (id, user_id, status, total_amount, payment_method, shipping_method,
                            shipping_address, created_at, updated_at)
        VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $7)
        "#,
        [
            order_id.into(),
            draft.user_id.into(),
            total_amount.into(),
            draft.details.payment_method.clone().into(),
            draft.details.shipping_method.clone().into(),
            draft.details.shipping_address.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    let mut items = Vec::with_capacity(draft.lines.len());
    for line in &draft.lines {
        let item = OrderItem {
            id: Uuid::now_v7(),
            order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            price: line.price,
            discount: line.discount,
        };

        conn.execute_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, price, discount)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
            [
                item.id.into(),
                item.order_id.into(),
                item.product_id.into(),
                item.quantity.into(),
                item.price.into(),
                item.discount.into(),
            ],
        ))
        .await?;

        items.push(item);
    }

    Ok(Order {
        id: order_id,
        user_id: draft.user_id,
        status: OrderStatus::Pending,
        total_amount,
        payment_method: draft.details.payment_method.clone(),
        shipping_method: draft.details.shipping_method.clone(),
        shipping_address: draft.details.shipping_address.clone(),
        created_at: now,
        updated_at: now,
        items,
    })
}

pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn attach_items(&self, orders: Vec<order::Model>) -> OrderResult<Vec<Order>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for item in order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(ids))
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await?
        {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into());
        }

        Ok(orders
            .into_iter()
            .map(|model| {
                let items = items_by_order.remove(&model.id).unwrap_or_default();
                model.into_order(items)
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn place(&self, draft: OrderDraft) -> OrderResult<Order> {
        let txn = self.db.begin().await?;
        let order = insert_order(&txn, &draft).await?;
        txn.commit().await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total_amount = order.total_amount,
            items = order.items.len(),
            "Placed order"
        );
        Ok(order)
    }

    async fn place_from_cart(
        &self,
        user_id: Uuid,
        details: ShippingDetails,
    ) -> OrderResult<Order> {
        let txn = self.db.begin().await?;

        let rows = CartSourceRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT c.id, c.product_id, c.quantity, p.price, p.discount
            FROM carts c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.product_id
            FOR UPDATE OF c
            "#,
            [user_id.into()],
        ))
        .all(&txn)
        .await?;

        if rows.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let cart_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let draft = OrderDraft {
            user_id,
            details,
            lines: rows
                .into_iter()
                .map(|row| OrderLine {
                    product_id: row.product_id,
                    quantity: row.quantity,
                    price: row.price,
                    discount: row.discount,
                })
                .collect(),
        };

        let order = insert_order(&txn, &draft).await?;

        cart::Entity::delete_many()
            .filter(cart::Column::Id.is_in(cart_ids))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total_amount = order.total_amount,
            items = order.items.len(),
            "Placed order from cart"
        );
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let Some(model) = order::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let items = order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(id))
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(model.into_order(items)))
    }

    async fn list(&self, user_id: Option<Uuid>) -> OrderResult<Vec<Order>> {
        let mut query = order::Entity::find();
        if let Some(user_id) = user_id {
            query = query.filter(order::Column::UserId.eq(user_id));
        }

        let orders = query
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .all(&self.db)
            .await?;

        self.attach_items(orders).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> OrderResult<bool> {
        let result = self
            .db
            .execute_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                UPDATE orders
                SET status = CAST($1 AS order_status), updated_at = NOW()
                WHERE id = $2 AND status = CAST($3 AS order_status)
                "#,
                [to.to_string().into(), id.into(), from.to_string().into()],
            ))
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(order_id = %id, from = %from, to = %to, "Updated order status");
        }
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        let result = order::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(order_id = %id, "Deleted order");
        }
        Ok(result.rows_affected > 0)
    }
}
