//! Helpers shared by every PostgreSQL consumer

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult, DbErrKind, classify_db_err};
pub use retry::{RetryConfig, retry_while};
