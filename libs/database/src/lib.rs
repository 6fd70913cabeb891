//! PostgreSQL plumbing for the shop services.
//!
//! - [`postgres`]: pool configuration, connect with retry, migrations, health ping
//! - [`common`]: retry with exponential backoff and storage error classification
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//!
//! let db = connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! run_migrations::<migration::Migrator>(&db, "shop_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, DbErrKind, classify_db_err};
