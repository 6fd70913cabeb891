use chrono::{DateTime, Utc};
use core_config::{ConfigError, FromEnv, env_or_default};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Back-office account state; only `active` admins may log in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "admin_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdminStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "blocked")]
    Blocked,
}

/// Shopper account as stored
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: normalize_email(&input.email),
            password_hash,
            phone: input.phone,
            avatar: input.avatar,
            address: input.address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; the password is hashed by the caller
    pub fn apply_update(&mut self, update: UpdateUser, password_hash: Option<String>) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        self.updated_at = Utc::now();
    }
}

/// User as returned by the API (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration payload, also used by admins creating users
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
}

/// Query parameters for the admin user list
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u64 {
    50
}

/// Back-office account as stored
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub status: AdminStatus,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(input: CreateAdmin, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: input.username,
            name: input.name,
            avatar: None,
            email: normalize_email(&input.email),
            password_hash,
            status: AdminStatus::Active,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub email: String,
    pub status: AdminStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            name: admin.name,
            avatar: admin.avatar,
            email: admin.email,
            status: admin.status,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdmin {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminStatus {
    pub status: AdminStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminAuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub admin: AdminResponse,
}

/// The caller's own account, tagged by role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    User(UserResponse),
    Admin(AdminResponse),
}

/// Returned once by the reset-password endpoint; never stored in clear
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetPasswordResponse {
    pub admin_id: Uuid,
    pub temporary_password: String,
}

/// Bootstrap admin created at startup when its username is unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl FromEnv for DefaultAdmin {
    /// - `DEFAULT_ADMIN_USERNAME`: defaults to `admin`
    /// - `DEFAULT_ADMIN_EMAIL`: defaults to `admin@example.com`
    /// - `DEFAULT_ADMIN_PASSWORD`: defaults to `admin123`
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            username: env_or_default("DEFAULT_ADMIN_USERNAME", "admin"),
            email: env_or_default("DEFAULT_ADMIN_EMAIL", "admin@example.com"),
            password: env_or_default("DEFAULT_ADMIN_PASSWORD", "admin123"),
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
