//! Sea-ORM entities for the `products` and `categories` tables

pub mod category;
pub mod product;
