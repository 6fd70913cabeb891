//! Payments Domain
//!
//! Payment records attached to orders. A payment can only be created by the
//! owner of its order; status changes are admin-only and follow
//! [`PaymentStatus::can_transition_to`]. `paid_at` is stamped the first time a
//! payment becomes `completed` and never moves afterwards.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PaymentError, PaymentResult};
pub use models::{CreatePayment, Payment, PaymentFilter, PaymentStatus, UpdatePayment};
pub use postgres::PgPaymentRepository;
pub use repository::PaymentRepository;
pub use service::PaymentService;
