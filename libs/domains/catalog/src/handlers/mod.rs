//! HTTP endpoints, mounted by the binary under `/products` and `/categories`.

pub mod categories;
pub mod products;
