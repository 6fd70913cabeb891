//! Cart Domain
//!
//! A per-user list of products and quantities, one row per
//! (user, product). Adding a product already in the cart adds to its
//! quantity. Orders placed from the cart read and clear these rows inside the
//! order transaction (see `domain_orders`).

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CartError, CartResult};
pub use models::{AddToCart, CartItem, CartLine, CartView, UpdateCartItem};
pub use postgres::PgCartRepository;
pub use repository::CartRepository;
pub use service::CartService;
