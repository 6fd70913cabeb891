use axum::Router;
use domain_statistics::{StatisticsService, PgStatisticsRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgStatisticsRepository::new(state.db.clone());
    handlers::router(StatisticsService::new(repository))
}
