use axum::Router;
use domain_catalog::{
    CategoryService, PgCategoryRepository, PgProductRepository, ProductService, handlers,
};

use crate::state::AppState;

pub fn products_router(state: &AppState) -> Router {
    let service = ProductService::new(
        PgProductRepository::new(state.db.clone()),
        PgCategoryRepository::new(state.db.clone()),
    );
    handlers::products::router(service)
}

pub fn categories_router(state: &AppState) -> Router {
    let service = CategoryService::new(PgCategoryRepository::new(state.db.clone()));
    handlers::categories::router(service)
}
