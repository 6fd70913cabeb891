use axum::Router;
use domain_shipments::{ShipmentService, PgShipmentRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgShipmentRepository::new(state.db.clone());
    handlers::router(ShipmentService::new(repository))
}
