//! Shared application state.
//!
//! Cloned into the readiness router and read once by [`crate::api::routes`]
//! to build the domain services.

use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Token issuer/verifier shared by the accounts domain and the auth middleware
    pub jwt_auth: JwtAuth,
}
