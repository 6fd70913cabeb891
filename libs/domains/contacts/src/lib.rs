//! Contacts Domain
//!
//! Messages sent through the contact form. Anyone can submit; submissions by
//! a signed-in user are linked to them. Admins triage messages by setting a
//! status and writing a response.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ContactError, ContactResult};
pub use models::{Contact, ContactStatus, ContactType, CreateContact, UpdateContact};
pub use postgres::PgContactRepository;
pub use repository::ContactRepository;
pub use service::ContactService;
