use axum_helpers::Principal;
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::error::StatisticsResult;
use crate::models::{OverviewStats, ProductStats, SalesStats, StatsWindow, UserStats};
use crate::repository::StatisticsRepository;

/// Admin dashboard figures
pub struct StatisticsService<R: StatisticsRepository> {
    repository: Arc<R>,
}

impl<R: StatisticsRepository> StatisticsService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn overview(&self, principal: Principal) -> StatisticsResult<OverviewStats> {
        principal.require_admin()?;
        self.repository.overview(StatsWindow::at(Utc::now())).await
    }

    #[instrument(skip(self))]
    pub async fn sales(&self, principal: Principal) -> StatisticsResult<SalesStats> {
        principal.require_admin()?;
        self.repository.sales(StatsWindow::at(Utc::now())).await
    }

    #[instrument(skip(self))]
    pub async fn products(&self, principal: Principal) -> StatisticsResult<ProductStats> {
        principal.require_admin()?;
        self.repository.products(StatsWindow::at(Utc::now())).await
    }

    #[instrument(skip(self))]
    pub async fn users(&self, principal: Principal) -> StatisticsResult<UserStats> {
        principal.require_admin()?;
        let window = StatsWindow::at(Utc::now());
        let mut stats = self.repository.users(window).await?;
        stats.registration_trend = window.zero_filled_trend(stats.registration_trend);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatisticsError;
    use crate::models::{DailyCount, TREND_DAYS};
    use crate::repository::MockStatisticsRepository;
    use uuid::Uuid;

    fn overview_at(window: StatsWindow) -> OverviewStats {
        OverviewStats {
            total_users: 3,
            total_products: 12,
            total_orders: 4,
            total_revenue: 250.5,
            total_reviews: 2,
            pending_orders: 1,
            low_stock_products: 5,
            timestamp: window.now,
        }
    }

    #[tokio::test]
    async fn test_overview_for_admin() {
        let mut repo = MockStatisticsRepository::new();
        repo.expect_overview().times(1).returning(|w| Ok(overview_at(w)));

        let service = StatisticsService::new(repo);
        let stats = service
            .overview(Principal::admin(Uuid::now_v7()))
            .await
            .unwrap();

        assert_eq!(stats.total_products, 12);
        assert_eq!(stats.low_stock_products, 5);
    }

    #[tokio::test]
    async fn test_users_are_forbidden() {
        let mut repo = MockStatisticsRepository::new();
        repo.expect_overview().never();
        repo.expect_sales().never();

        let service = StatisticsService::new(repo);
        let user = Principal::user(Uuid::now_v7());

        assert!(matches!(
            service.overview(user).await,
            Err(StatisticsError::Forbidden(_))
        ));
        assert!(matches!(
            service.sales(user).await,
            Err(StatisticsError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_registration_trend_is_padded() {
        let mut repo = MockStatisticsRepository::new();
        repo.expect_users().returning(|window| {
            Ok(UserStats {
                new_users_today: 1,
                new_users_this_month: 1,
                active_users: 0,
                registration_trend: vec![DailyCount {
                    date: window.now.date_naive(),
                    count: 1,
                }],
                timestamp: window.now,
            })
        });

        let service = StatisticsService::new(repo);
        let stats = service.users(Principal::admin(Uuid::now_v7())).await.unwrap();

        assert_eq!(stats.registration_trend.len(), TREND_DAYS as usize);
        assert_eq!(stats.registration_trend.last().map(|d| d.count), Some(1));
        assert_eq!(
            stats
                .registration_trend
                .iter()
                .map(|d| d.count)
                .sum::<i64>(),
            1
        );
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repo = MockStatisticsRepository::new();
        repo.expect_products()
            .returning(|_| Err(sea_orm::DbErr::Custom("connection refused".to_string()).into()));

        let service = StatisticsService::new(repo);
        let result = service.products(Principal::admin(Uuid::now_v7())).await;

        assert!(matches!(result, Err(StatisticsError::Database(_))));
    }
}
