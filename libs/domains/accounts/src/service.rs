use axum_helpers::{JwtAuth, Principal, Role};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::{
    Admin, AdminAuthResponse, AdminResponse, AdminStatus, AuthResponse, CreateAdmin, CreateUser,
    DefaultAdmin, LoginRequest, Profile, ResetPasswordResponse, User, UserFilter, UpdateUser,
    UserResponse, normalize_email,
};
use crate::password::{generate_temporary_password, hash_password, verify_password};
use crate::repository::{AdminRepository, UserRepository};

const TOKEN_TYPE: &str = "Bearer";

/// Service layer for authentication and account management
pub struct AccountService<U: UserRepository, A: AdminRepository> {
    users: Arc<U>,
    admins: Arc<A>,
    auth: JwtAuth,
}

impl<U: UserRepository, A: AdminRepository> Clone for AccountService<U, A> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            admins: Arc::clone(&self.admins),
            auth: self.auth.clone(),
        }
    }
}

impl<U: UserRepository, A: AdminRepository> AccountService<U, A> {
    pub fn new(users: U, admins: A, auth: JwtAuth) -> Self {
        Self {
            users: Arc::new(users),
            admins: Arc::new(admins),
            auth,
        }
    }

    fn issue_token(&self, id: Uuid, email: &str, role: Role) -> AccountResult<String> {
        self.auth
            .issue(id, email, role)
            .map_err(|e| AccountError::Token(e.to_string()))
    }

    // Shopper authentication

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: CreateUser) -> AccountResult<AuthResponse> {
        let user = self.insert_user(input).await?;
        let access_token = self.issue_token(user.id, &user.email, Role::User)?;

        Ok(AuthResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            user: user.into(),
        })
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> AccountResult<AuthResponse> {
        let email = normalize_email(&input.email);
        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let access_token = self.issue_token(user.id, &user.email, Role::User)?;
        Ok(AuthResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            user: user.into(),
        })
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn admin_login(&self, input: LoginRequest) -> AccountResult<AdminAuthResponse> {
        let email = normalize_email(&input.email);
        let admin = self
            .admins
            .get_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(&input.password, &admin.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        if admin.status != AdminStatus::Active {
            return Err(AccountError::AccountDisabled(admin.status.to_string()));
        }

        let access_token = self.issue_token(admin.id, &admin.email, Role::Admin)?;
        Ok(AdminAuthResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            admin: admin.into(),
        })
    }

    /// The caller's own account; the subject may have been deleted since the
    /// token was issued
    pub async fn profile(&self, principal: Principal) -> AccountResult<Profile> {
        match principal.role {
            Role::User => self
                .users
                .get_by_id(principal.id)
                .await?
                .map(|u| Profile::User(u.into()))
                .ok_or(AccountError::SubjectGone),
            Role::Admin => self
                .admins
                .get_by_id(principal.id)
                .await?
                .map(|a| Profile::Admin(a.into()))
                .ok_or(AccountError::SubjectGone),
        }
    }

    // Admin management

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_admin(
        &self,
        principal: Principal,
        input: CreateAdmin,
    ) -> AccountResult<AdminResponse> {
        principal.require_admin()?;
        self.insert_admin(input).await.map(Into::into)
    }

    pub async fn list_admins(&self, principal: Principal) -> AccountResult<Vec<AdminResponse>> {
        principal.require_admin()?;
        let admins = self.admins.list().await?;
        Ok(admins.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(admin_id = %id))]
    pub async fn update_admin_status(
        &self,
        principal: Principal,
        id: Uuid,
        status: AdminStatus,
    ) -> AccountResult<AdminResponse> {
        principal.require_admin()?;
        self.admins
            .set_status(id, status)
            .await?
            .map(Into::into)
            .ok_or(AccountError::AdminNotFound(id))
    }

    /// Replace the admin's password with a random one, returned exactly once
    #[instrument(skip(self), fields(admin_id = %id))]
    pub async fn reset_admin_password(
        &self,
        principal: Principal,
        id: Uuid,
    ) -> AccountResult<ResetPasswordResponse> {
        principal.require_admin()?;

        let temporary_password = generate_temporary_password();
        let updated = self
            .admins
            .set_password_hash(id, hash_password(&temporary_password)?)
            .await?;

        if !updated {
            return Err(AccountError::AdminNotFound(id));
        }

        Ok(ResetPasswordResponse {
            admin_id: id,
            temporary_password,
        })
    }

    /// Create the bootstrap admin unless its username is already taken.
    /// Returns whether an admin was created.
    pub async fn ensure_default_admin(&self, default: &DefaultAdmin) -> AccountResult<bool> {
        if self
            .admins
            .get_by_username(&default.username)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let admin = self
            .insert_admin(CreateAdmin {
                username: default.username.clone(),
                name: Some("Default Admin".to_string()),
                email: default.email.clone(),
                password: default.password.clone(),
            })
            .await?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Created default admin");
        Ok(true)
    }

    // Admin-side user management

    pub async fn list_users(
        &self,
        principal: Principal,
        filter: UserFilter,
    ) -> AccountResult<Vec<UserResponse>> {
        principal.require_admin()?;
        let users = self.users.list(filter).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get_user(&self, principal: Principal, id: Uuid) -> AccountResult<UserResponse> {
        principal.require_admin()?;
        self.users
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(AccountError::UserNotFound(id))
    }

    pub async fn create_user(
        &self,
        principal: Principal,
        input: CreateUser,
    ) -> AccountResult<UserResponse> {
        principal.require_admin()?;
        self.insert_user(input).await.map(Into::into)
    }

    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_user(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateUser,
    ) -> AccountResult<UserResponse> {
        principal.require_admin()?;

        let mut user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound(id))?;

        if let Some(ref email) = input.email {
            let email = normalize_email(email);
            if email != user.email && self.users.email_exists(&email).await? {
                return Err(AccountError::DuplicateEmail(email));
            }
        }

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        user.apply_update(input, password_hash);

        self.users.update(user).await.map(Into::into)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, principal: Principal, id: Uuid) -> AccountResult<()> {
        principal.require_admin()?;

        if !self.users.delete(id).await? {
            return Err(AccountError::UserNotFound(id));
        }
        Ok(())
    }

    async fn insert_user(&self, input: CreateUser) -> AccountResult<User> {
        let email = normalize_email(&input.email);
        if self.users.email_exists(&email).await? {
            return Err(AccountError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        self.users.create(User::new(input, password_hash)).await
    }

    async fn insert_admin(&self, input: CreateAdmin) -> AccountResult<Admin> {
        if self.admins.get_by_username(&input.username).await?.is_some() {
            return Err(AccountError::DuplicateUsername(input.username));
        }

        let email = normalize_email(&input.email);
        if self.admins.email_exists(&email).await? {
            return Err(AccountError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        self.admins.create(Admin::new(input, password_hash)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockAdminRepository, MockUserRepository};
    use axum_helpers::JwtConfig;
    use chrono::Utc;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("account-tests-secret-with-32-characters!"))
    }

    fn service(
        users: MockUserRepository,
        admins: MockAdminRepository,
    ) -> AccountService<MockUserRepository, MockAdminRepository> {
        AccountService::new(users, admins, jwt())
    }

    fn stored_user(email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            name: Some("Ada".to_string()),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            phone: None,
            avatar: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_admin(status: AdminStatus) -> Admin {
        Admin {
            id: Uuid::now_v7(),
            username: "ops".to_string(),
            name: None,
            avatar: None,
            email: "ops@example.com".to_string(),
            password_hash: hash_password("admin123").unwrap(),
            status,
            created_at: Utc::now(),
        }
    }

    fn register_input() -> CreateUser {
        CreateUser {
            name: None,
            email: "New@Example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
            avatar: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_register_returns_token_for_new_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_email_exists()
            .withf(|value| value == "new@example.com")
            .returning(|_| Ok(false));
        users.expect_create().returning(Ok);

        let svc = service(users, MockAdminRepository::new());
        let response = svc.register(register_input()).await.unwrap();

        assert_eq!(response.user.email, "new@example.com");
        assert_eq!(response.token_type, "Bearer");

        let claims = jwt().verify(&response.access_token).unwrap();
        assert_eq!(claims.sub, response.user.id.to_string());
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(true));
        users.expect_create().never();

        let svc = service(users, MockAdminRepository::new());
        let result = svc.register(register_input()).await;

        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let user = stored_user("ada@example.com", "correct-horse");
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(users, MockAdminRepository::new());
        let result = svc
            .login(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_email().returning(|_| Ok(None));

        let svc = service(users, MockAdminRepository::new());
        let result = svc
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_admin_login_rejects_blocked_admin() {
        let admin = stored_admin(AdminStatus::Blocked);
        let mut admins = MockAdminRepository::new();
        admins
            .expect_get_by_email()
            .returning(move |_| Ok(Some(admin.clone())));

        let svc = service(MockUserRepository::new(), admins);
        let result = svc
            .admin_login(LoginRequest {
                email: "ops@example.com".to_string(),
                password: "admin123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountError::AccountDisabled(s)) if s == "blocked"));
    }

    #[tokio::test]
    async fn test_admin_login_issues_admin_token() {
        let admin = stored_admin(AdminStatus::Active);
        let admin_id = admin.id;
        let mut admins = MockAdminRepository::new();
        admins
            .expect_get_by_email()
            .returning(move |_| Ok(Some(admin.clone())));

        let svc = service(MockUserRepository::new(), admins);
        let response = svc
            .admin_login(LoginRequest {
                email: "OPS@example.com".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap();

        let claims = jwt().verify(&response.access_token).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.sub, admin_id.to_string());
    }

    #[tokio::test]
    async fn test_profile_of_deleted_user_is_subject_gone() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));

        let svc = service(users, MockAdminRepository::new());
        let result = svc.profile(Principal::user(Uuid::now_v7())).await;

        assert!(matches!(result, Err(AccountError::SubjectGone)));
    }

    #[tokio::test]
    async fn test_admin_operations_require_admin_role() {
        let mut admins = MockAdminRepository::new();
        admins.expect_list().never();

        let svc = service(MockUserRepository::new(), admins);
        let result = svc.list_admins(Principal::user(Uuid::now_v7())).await;

        assert!(matches!(result, Err(AccountError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_admin_duplicate_username() {
        let existing = stored_admin(AdminStatus::Active);
        let mut admins = MockAdminRepository::new();
        admins
            .expect_get_by_username()
            .withf(|value| value == "ops")
            .returning(move |_| Ok(Some(existing.clone())));
        admins.expect_create().never();

        let svc = service(MockUserRepository::new(), admins);
        let result = svc
            .create_admin(
                Principal::admin(Uuid::now_v7()),
                CreateAdmin {
                    username: "ops".to_string(),
                    name: None,
                    email: "other@example.com".to_string(),
                    password: "secret1".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AccountError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_reset_password_stores_hash_of_returned_password() {
        let id = Uuid::now_v7();
        let stored = Arc::new(std::sync::Mutex::new(String::new()));
        let captured = Arc::clone(&stored);

        let mut admins = MockAdminRepository::new();
        admins
            .expect_set_password_hash()
            .withf(move |admin_id, _| *admin_id == id)
            .returning(move |_, hash| {
                *captured.lock().unwrap() = hash;
                Ok(true)
            });

        let svc = service(MockUserRepository::new(), admins);
        let response = svc
            .reset_admin_password(Principal::admin(Uuid::now_v7()), id)
            .await
            .unwrap();

        let hash = stored.lock().unwrap().clone();
        assert_ne!(hash, response.temporary_password);
        assert!(verify_password(&response.temporary_password, &hash).unwrap());
    }

    #[tokio::test]
    async fn test_reset_password_unknown_admin() {
        let mut admins = MockAdminRepository::new();
        admins.expect_set_password_hash().returning(|_, _| Ok(false));

        let svc = service(MockUserRepository::new(), admins);
        let result = svc
            .reset_admin_password(Principal::admin(Uuid::now_v7()), Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(AccountError::AdminNotFound(_))));
    }

    #[tokio::test]
    async fn test_ensure_default_admin_is_idempotent() {
        let existing = stored_admin(AdminStatus::Active);
        let mut admins = MockAdminRepository::new();
        admins
            .expect_get_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        admins.expect_create().never();

        let svc = service(MockUserRepository::new(), admins);
        let created = svc
            .ensure_default_admin(&DefaultAdmin {
                username: "ops".to_string(),
                email: "ops@example.com".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap();

        assert!(!created);
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let user = stored_user("ada@example.com", "secret1");
        let id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_email_exists()
            .withf(|value| value == "taken@example.com")
            .returning(|_| Ok(true));
        users.expect_update().never();

        let svc = service(users, MockAdminRepository::new());
        let result = svc
            .update_user(
                Principal::admin(Uuid::now_v7()),
                id,
                UpdateUser {
                    email: Some("Taken@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }
}
