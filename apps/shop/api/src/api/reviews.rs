use axum::Router;
use domain_reviews::{ReviewService, PgReviewRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgReviewRepository::new(state.db.clone());
    handlers::router(ReviewService::new(repository))
}
