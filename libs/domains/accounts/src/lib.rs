//! Accounts Domain
//!
//! Shoppers (`users`) and back-office operators (`admins`): registration,
//! login, profiles, admin management and admin-side user CRUD.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth and /users endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Argon2 hashing, token issuing, role checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← UserRepository / AdminRepository (trait + Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_accounts::{AccountService, PgAdminRepository, PgUserRepository, handlers};
//!
//! let service = AccountService::new(
//!     PgUserRepository::new(db.clone()),
//!     PgAdminRepository::new(db.clone()),
//!     jwt_auth,
//! );
//!
//! let auth = handlers::auth::router(service.clone());
//! let users = handlers::users::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{AccountError, AccountResult};
pub use models::{
    Admin, AdminAuthResponse, AdminResponse, AdminStatus, AuthResponse, CreateAdmin, CreateUser,
    DefaultAdmin, LoginRequest, Profile, ResetPasswordResponse, UpdateAdminStatus, UpdateUser,
    User, UserFilter, UserResponse,
};
pub use postgres::{PgAdminRepository, PgUserRepository};
pub use repository::{AdminRepository, UserRepository};
pub use service::AccountService;
