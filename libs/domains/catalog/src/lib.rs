//! Catalog Domain
//!
//! Products and categories. Products are read publicly with filtering,
//! sorting, pagination and an average review rating; every write is admin
//! only. Stock is decremented by order placement, not here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /products and /categories endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Admin checks, category existence
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← ProductRepository / CategoryRepository (trait + Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, query filters
//! └─────────────┘
//! ```
//!
//! Other domains reference `entity::product` directly for existence checks
//! and joins.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CategoryWithCount, CreateCategory, CreateProduct, Product, ProductFilter,
    ProductPage, ProductSortField, ProductWithRating, SortOrder, UpdateCategory, UpdateProduct,
};
pub use postgres::{PgCategoryRepository, PgProductRepository};
pub use repository::{CategoryRepository, ProductRepository};
pub use service::{CategoryService, ProductService};
