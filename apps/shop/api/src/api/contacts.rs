use axum::Router;
use domain_contacts::{ContactService, PgContactRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgContactRepository::new(state.db.clone());
    handlers::router(ContactService::new(repository))
}
