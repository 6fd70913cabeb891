use axum::Router;
use domain_accounts::{AccountService, PgAdminRepository, PgUserRepository, handlers};

use crate::state::AppState;

pub fn service(state: &AppState) -> AccountService<PgUserRepository, PgAdminRepository> {
    AccountService::new(
        PgUserRepository::new(state.db.clone()),
        PgAdminRepository::new(state.db.clone()),
        state.jwt_auth.clone(),
    )
}

pub fn auth_router(state: &AppState) -> Router {
    handlers::auth::router(service(state))
}

pub fn users_router(state: &AppState) -> Router {
    handlers::users::router(service(state))
}
