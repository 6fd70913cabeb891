use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod contacts;
pub mod health;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod shipments;
pub mod statistics;
pub mod wishlists;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `create_router`.
///
/// Every route runs behind the JWT middleware; handlers decide whether a
/// principal is required.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/auth", accounts::auth_router(state))
        .nest("/users", accounts::users_router(state))
        .nest("/products", catalog::products_router(state))
        .nest("/categories", catalog::categories_router(state))
        .nest("/cart", cart::router(state))
        .nest("/orders", orders::router(state))
        .nest("/payments", payments::router(state))
        .nest("/shipments", shipments::router(state))
        .nest("/reviews", reviews::router(state))
        .nest("/wishlists", wishlists::router(state))
        .nest("/contacts", contacts::router(state))
        .nest("/statistics", statistics::router(state))
        .layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            jwt_auth_middleware,
        ))
}

/// Router with the `/ready` endpoint, which pings the database.
///
/// Has its state applied, so it merges with the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
