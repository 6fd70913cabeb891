use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Products at or below this stock level count as low stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Days covered by the registration trend, today included
pub const TREND_DAYS: u64 = 7;

/// Maximum number of entries in the low stock list
pub const LOW_STOCK_LIST_LIMIT: u64 = 20;

pub const TOP_SELLING_LIMIT: u64 = 10;

/// Time boundaries shared by the queries of one request, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    pub now: DateTime<Utc>,
    pub start_of_today: DateTime<Utc>,
    /// 30 days before `now`
    pub month_ago: DateTime<Utc>,
    /// Midnight at the start of the registration trend
    pub trend_start: DateTime<Utc>,
}

impl StatsWindow {
    pub fn at(now: DateTime<Utc>) -> Self {
        let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        Self {
            now,
            start_of_today,
            month_ago: now - TimeDelta::days(30),
            trend_start: start_of_today - TimeDelta::days(TREND_DAYS as i64 - 1),
        }
    }

    /// One entry per trend day, oldest first, with missing days as zero
    pub fn zero_filled_trend(&self, rows: Vec<DailyCount>) -> Vec<DailyCount> {
        let counts: HashMap<NaiveDate, i64> =
            rows.into_iter().map(|row| (row.date, row.count)).collect();
        let first_day = self.trend_start.date_naive();

        (0..TREND_DAYS)
            .filter_map(|offset| first_day.checked_add_days(Days::new(offset)))
            .map(|date| DailyCount {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OverviewStats {
    pub total_users: i64,
    pub total_products: i64,
    pub total_orders: i64,
    /// Sum of completed payments
    pub total_revenue: f64,
    pub total_reviews: i64,
    pub pending_orders: i64,
    pub low_stock_products: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesStats {
    pub today_orders: i64,
    /// Last 30 days
    pub monthly_orders: i64,
    /// Completed payments by `paid_at`
    pub today_revenue: f64,
    pub monthly_revenue: f64,
    pub order_status_stats: Vec<StatusCount>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct TopSellingProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct CategoryCount {
    /// `None` groups products without a category
    pub category_name: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct LowStockProduct {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductStats {
    pub top_selling_products: Vec<TopSellingProduct>,
    pub products_by_category: Vec<CategoryCount>,
    /// Lowest stock first
    pub low_stock_products: Vec<LowStockProduct>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserStats {
    pub new_users_today: i64,
    /// Last 30 days
    pub new_users_this_month: i64,
    /// Distinct users with an order in the last 30 days
    pub active_users: i64,
    pub registration_trend: Vec<DailyCount>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_boundaries() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap();
        let window = StatsWindow::at(now);

        assert_eq!(
            window.start_of_today,
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(
            window.month_ago,
            Utc.with_ymd_and_hms(2025, 2, 8, 15, 30, 0).unwrap()
        );
        assert_eq!(
            window.trend_start,
            Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_trend_is_zero_filled() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let window = StatsWindow::at(now);

        let trend = window.zero_filled_trend(vec![
            DailyCount {
                date: day(2025, 3, 5),
                count: 2,
            },
            DailyCount {
                date: day(2025, 3, 10),
                count: 1,
            },
        ]);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, day(2025, 3, 4));
        assert_eq!(trend[6].date, day(2025, 3, 10));
        let counts: Vec<i64> = trend.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![0, 2, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_trend_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 1).unwrap();
        let trend = StatsWindow::at(now).zero_filled_trend(vec![]);

        assert_eq!(trend[0].date, day(2025, 2, 24));
        assert!(trend.iter().all(|d| d.count == 0));
    }
}
