use axum::Router;
use domain_wishlists::{WishlistService, PgWishlistRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgWishlistRepository::new(state.db.clone());
    handlers::router(WishlistService::new(repository))
}
