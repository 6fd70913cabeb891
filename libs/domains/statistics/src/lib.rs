//! Statistics Domain
//!
//! Read-only dashboard figures for admins, aggregated straight from the
//! shop tables. Figures reflect committed data at query time; no caching.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{StatisticsError, StatisticsResult};
pub use models::{
    CategoryCount, DailyCount, LOW_STOCK_THRESHOLD, LowStockProduct, OverviewStats, ProductStats,
    SalesStats, StatsWindow, StatusCount, TopSellingProduct, UserStats,
};
pub use postgres::PgStatisticsRepository;
pub use repository::StatisticsRepository;
pub use service::StatisticsService;
