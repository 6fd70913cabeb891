use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AccountResult;
use crate::models::{Admin, AdminStatus, User, UserFilter};

/// Repository trait for shopper accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AccountResult<User>;

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<User>>;

    /// Lookup by normalized (lower-case) email
    async fn get_by_email(&self, email: &str) -> AccountResult<Option<User>>;

    async fn list(&self, filter: UserFilter) -> AccountResult<Vec<User>>;

    /// Persist every field of an existing user
    async fn update(&self, user: User) -> AccountResult<User>;

    async fn delete(&self, id: Uuid) -> AccountResult<bool>;

    async fn email_exists(&self, email: &str) -> AccountResult<bool>;
}

/// Repository trait for back-office accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: Admin) -> AccountResult<Admin>;

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<Admin>>;

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<Admin>>;

    async fn get_by_username(&self, username: &str) -> AccountResult<Option<Admin>>;

    /// Newest first
    async fn list(&self) -> AccountResult<Vec<Admin>>;

    async fn set_status(&self, id: Uuid, status: AdminStatus) -> AccountResult<Option<Admin>>;

    async fn set_password_hash(&self, id: Uuid, password_hash: String) -> AccountResult<bool>;

    async fn email_exists(&self, email: &str) -> AccountResult<bool>;
}
