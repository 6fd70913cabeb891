//! Reviews Domain
//!
//! Product ratings from 1 to 5 with an optional comment, at most one per
//! user and product. Reviews are public to read; only their author can change
//! or delete them. Average ratings shown on products are computed from this
//! table by the catalog.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ReviewError, ReviewResult};
pub use models::{CreateReview, Review, ReviewFilter, UpdateReview};
pub use postgres::PgReviewRepository;
pub use repository::ReviewRepository;
pub use service::ReviewService;
