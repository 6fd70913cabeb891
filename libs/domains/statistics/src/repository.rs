use async_trait::async_trait;

use crate::error::StatisticsResult;
use crate::models::{OverviewStats, ProductStats, SalesStats, StatsWindow, UserStats};

/// Aggregate queries; `timestamp` fields are taken from `window.now`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    async fn overview(&self, window: StatsWindow) -> StatisticsResult<OverviewStats>;

    async fn sales(&self, window: StatsWindow) -> StatisticsResult<SalesStats>;

    async fn products(&self, window: StatsWindow) -> StatisticsResult<ProductStats>;

    /// `registration_trend` only holds days with registrations
    async fn users(&self, window: StatsWindow) -> StatisticsResult<UserStats>;
}
