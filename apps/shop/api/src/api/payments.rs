use axum::Router;
use domain_payments::{PaymentService, PgPaymentRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgPaymentRepository::new(state.db.clone());
    handlers::router(PaymentService::new(repository))
}
