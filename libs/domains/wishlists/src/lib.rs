//! Wishlists Domain
//!
//! Products a user wants to keep an eye on, one row per (user, product).

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{WishlistError, WishlistResult};
pub use models::{AddToWishlist, WishlistCheck, WishlistEntry, WishlistItem};
pub use postgres::PgWishlistRepository;
pub use repository::WishlistRepository;
pub use service::WishlistService;
