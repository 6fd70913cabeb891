use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::{
    error::StatisticsResult,
    models::{
        CategoryCount, DailyCount, LOW_STOCK_LIST_LIMIT, LOW_STOCK_THRESHOLD, LowStockProduct,
        OverviewStats, ProductStats, SalesStats, StatsWindow, StatusCount, TOP_SELLING_LIMIT,
        TopSellingProduct, UserStats,
    },
    repository::StatisticsRepository,
};

#[derive(Debug, FromQueryResult)]
struct OverviewRow {
    total_users: i64,
    total_products: i64,
    total_orders: i64,
    total_revenue: f64,
    total_reviews: i64,
    pending_orders: i64,
    low_stock_products: i64,
}

#[derive(Debug, FromQueryResult)]
struct SalesRow {
    today_orders: i64,
    monthly_orders: i64,
    today_revenue: f64,
    monthly_revenue: f64,
}

#[derive(Debug, FromQueryResult)]
struct UserCountsRow {
    new_users_today: i64,
    new_users_this_month: i64,
    active_users: i64,
}

pub struct PgStatisticsRepository {
    db: DatabaseConnection,
}

impl PgStatisticsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatisticsRepository for PgStatisticsRepository {
    async fn overview(&self, window: StatsWindow) -> StatisticsResult<OverviewStats> {
        let row = OverviewRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COALESCE(SUM(amount), 0)::float8 FROM payments
                    WHERE status = 'completed') AS total_revenue,
                (SELECT COUNT(*) FROM reviews) AS total_reviews,
                (SELECT COUNT(*) FROM orders WHERE status = 'pending') AS pending_orders,
                (SELECT COUNT(*) FROM products WHERE stock <= $1) AS low_stock_products
            "#,
            [LOW_STOCK_THRESHOLD.into()],
        ))
        .one(&self.db)
        .await?
        .ok_or(sea_orm::DbErr::RecordNotFound("overview".to_string()))?;

        Ok(OverviewStats {
            total_users: row.total_users,
            total_products: row.total_products,
            total_orders: row.total_orders,
            total_revenue: row.total_revenue,
            total_reviews: row.total_reviews,
            pending_orders: row.pending_orders,
            low_stock_products: row.low_stock_products,
            timestamp: window.now,
        })
    }

    async fn sales(&self, window: StatsWindow) -> StatisticsResult<SalesStats> {
        let totals = SalesRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT
                (SELECT COUNT(*) FROM orders WHERE created_at >= $1) AS today_orders,
                (SELECT COUNT(*) FROM orders WHERE created_at >= $2) AS monthly_orders,
                (SELECT COALESCE(SUM(amount), 0)::float8 FROM payments
                    WHERE status = 'completed' AND paid_at >= $1) AS today_revenue,
                (SELECT COALESCE(SUM(amount), 0)::float8 FROM payments
                    WHERE status = 'completed' AND paid_at >= $2) AS monthly_revenue
            "#,
            [window.start_of_today.into(), window.month_ago.into()],
        ))
        .one(&self.db)
        .await?
        .ok_or(sea_orm::DbErr::RecordNotFound("sales".to_string()))?;

        let order_status_stats = StatusCount::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT status::text AS status, COUNT(*) AS count
            FROM orders
            GROUP BY status
            ORDER BY status
            "#,
        ))
        .all(&self.db)
        .await?;

        Ok(SalesStats {
            today_orders: totals.today_orders,
            monthly_orders: totals.monthly_orders,
            today_revenue: totals.today_revenue,
            monthly_revenue: totals.monthly_revenue,
            order_status_stats,
            timestamp: window.now,
        })
    }

    async fn products(&self, window: StatsWindow) -> StatisticsResult<ProductStats> {
        let top_selling_products = TopSellingProduct::find_by_statement(
            Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT p.id AS product_id, p.name AS product_name,
                       SUM(oi.quantity)::int8 AS total_sold
                FROM order_items oi
                JOIN products p ON p.id = oi.product_id
                GROUP BY p.id, p.name
                ORDER BY total_sold DESC, p.name
                LIMIT $1
                "#,
                [(TOP_SELLING_LIMIT as i64).into()],
            ),
        )
        .all(&self.db)
        .await?;

        let products_by_category = CategoryCount::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT c.name AS category_name, COUNT(p.id) AS count
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            GROUP BY c.name
            ORDER BY count DESC, category_name NULLS LAST
            "#,
        ))
        .all(&self.db)
        .await?;

        let low_stock_products = LowStockProduct::find_by_statement(
            Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT id, name, stock
                FROM products
                WHERE stock <= $1
                ORDER BY stock, name
                LIMIT $2
                "#,
                [
                    LOW_STOCK_THRESHOLD.into(),
                    (LOW_STOCK_LIST_LIMIT as i64).into(),
                ],
            ),
        )
        .all(&self.db)
        .await?;

        Ok(ProductStats {
            top_selling_products,
            products_by_category,
            low_stock_products,
            timestamp: window.now,
        })
    }

    async fn users(&self, window: StatsWindow) -> StatisticsResult<UserStats> {
        let counts = UserCountsRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE created_at >= $1) AS new_users_today,
                (SELECT COUNT(*) FROM users WHERE created_at >= $2) AS new_users_this_month,
                (SELECT COUNT(DISTINCT user_id) FROM orders
                    WHERE created_at >= $2) AS active_users
            "#,
            [window.start_of_today.into(), window.month_ago.into()],
        ))
        .one(&self.db)
        .await?
        .ok_or(sea_orm::DbErr::RecordNotFound("users".to_string()))?;

        let registration_trend = DailyCount::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS date, COUNT(*) AS count
            FROM users
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1
            "#,
            [window.trend_start.into()],
        ))
        .all(&self.db)
        .await?;

        tracing::debug!(days = registration_trend.len(), "Loaded registration trend");

        Ok(UserStats {
            new_users_today: counts.new_users_today,
            new_users_this_month: counts.new_users_this_month,
            active_users: counts.active_users,
            registration_trend,
            timestamp: window.now,
        })
    }
}
