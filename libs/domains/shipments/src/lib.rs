//! Shipments Domain
//!
//! Delivery records for orders, managed by admins. Anyone holding a tracking
//! number can look a shipment up. `shipped_at` and `delivered_at` are
//! stamped on the first move into the matching status; delivering a shipment
//! that was never marked shipped backfills `shipped_at` as well.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ShipmentError, ShipmentResult};
pub use models::{CreateShipment, Shipment, ShipmentFilter, ShipmentStatus, UpdateShipment};
pub use postgres::PgShipmentRepository;
pub use repository::ShipmentRepository;
pub use service::ShipmentService;
