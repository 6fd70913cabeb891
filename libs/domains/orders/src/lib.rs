//! Orders Domain
//!
//! Order placement with stock reservation, and the order status lifecycle.
//!
//! Placing an order decrements stock for every line and inserts the order
//! with its items in a single transaction; any shortage aborts the whole
//! placement. Orders can be placed from explicit lines or from the caller's
//! cart, in which case current product prices are used and the consumed cart
//! rows are deleted in the same transaction.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use models::{
    CreateOrder, Order, OrderDraft, OrderItem, OrderLine, OrderStatus, ShippingDetails,
    UpdateOrderStatus,
};
pub use postgres::PgOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
