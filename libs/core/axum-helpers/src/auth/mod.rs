//! Bearer-token authentication.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens carrying `(sub, email, role)`.
//! - [`jwt_auth_middleware`] turns a valid token into a [`Principal`] request extension.
//! - [`Principal`] is the extractor handlers pass explicitly into services.
//!
//! ```ignore
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let app = api_routes
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//!
//! async fn my_orders(principal: Principal) -> impl IntoResponse { /* ... */ }
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod principal;

pub use config::JwtConfig;
pub use jwt::{DEFAULT_TOKEN_TTL_SECS, JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
pub use principal::{AdminRequired, Principal, Role};
