use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{AccountError, AccountResult};
use crate::models::{
    AdminAuthResponse, AdminResponse, AdminStatus, AuthResponse, CreateAdmin, CreateUser,
    LoginRequest, Profile, ResetPasswordResponse, UpdateAdminStatus, UserResponse,
};
use crate::repository::{AdminRepository, UserRepository};
use crate::service::AccountService;

pub const TAG: &str = "auth";

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        register,
        login,
        admin_login,
        profile,
        create_admin,
        list_admins,
        update_admin_status,
        reset_admin_password,
    ),
    components(
        schemas(
            CreateUser,
            LoginRequest,
            AuthResponse,
            AdminAuthResponse,
            UserResponse,
            AdminResponse,
            AdminStatus,
            Profile,
            CreateAdmin,
            UpdateAdminStatus,
            ResetPasswordResponse
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Registration, login and admin management")
    )
)]
pub struct ApiDoc;

type SharedService<U, A> = State<Arc<AccountService<U, A>>>;

/// Create the auth router
pub fn router<U, A>(service: AccountService<U, A>) -> Router
where
    U: UserRepository + 'static,
    A: AdminRepository + 'static,
{
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/admin/login", post(admin_login))
        .route("/profile", get(profile))
        .route("/admins", get(list_admins).post(create_admin))
        .route("/admins/{id}/status", patch(update_admin_status))
        .route("/admins/{id}/reset-password", post(reset_admin_password))
        .with_state(Arc::new(service))
}

/// Register a shopper account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> AccountResult<impl IntoResponse> {
    let response = service.register(input).await?;

    AuditEvent::new(
        Some(response.user.id),
        "auth.register",
        Some(format!("user:{}", response.user.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in as a shopper
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AccountResult<Json<AuthResponse>> {
    let email = input.email.clone();
    let result = service.login(input).await;
    audit_login("auth.login", &headers, &email, &result.as_ref().map(|r| r.user.id));
    Ok(Json(result?))
}

/// Log in as an admin; only active admins are accepted
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AdminAuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_login<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AccountResult<Json<AdminAuthResponse>> {
    let email = input.email.clone();
    let result = service.admin_login(input).await;
    audit_login(
        "auth.admin_login",
        &headers,
        &email,
        &result.as_ref().map(|r| r.admin.id),
    );
    Ok(Json(result?))
}

fn audit_login(
    action: &str,
    headers: &HeaderMap,
    email: &str,
    result: &Result<uuid::Uuid, &AccountError>,
) {
    let event = match result {
        Ok(id) => AuditEvent::new(Some(*id), action, None, AuditOutcome::Success)
            .with_details(json!({ "email": email })),
        Err(e) => AuditEvent::new(None, action, None, AuditOutcome::Denied)
            .with_details(json!({ "email": email, "reason": e.to_string() })),
    };
    event.with_request(headers).log();
}

/// Current user or admin profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = Profile),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn profile<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
) -> AccountResult<Json<Profile>> {
    Ok(Json(service.profile(principal).await?))
}

/// Create an admin account
#[utoipa::path(
    post,
    path = "/admins",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateAdmin,
    responses(
        (status = 201, description = "Admin created", body = AdminResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_admin<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateAdmin>,
) -> AccountResult<impl IntoResponse> {
    let admin = service.create_admin(principal, input).await?;

    AuditEvent::by(
        &principal,
        "admin.create",
        format!("admin:{}", admin.id),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "username": admin.username }))
    .log();

    Ok((StatusCode::CREATED, Json(admin)))
}

/// List admins, newest first
#[utoipa::path(
    get,
    path = "/admins",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admins", body = Vec<AdminResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_admins<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
) -> AccountResult<Json<Vec<AdminResponse>>> {
    Ok(Json(service.list_admins(principal).await?))
}

/// Set an admin's status
#[utoipa::path(
    patch,
    path = "/admins/{id}/status",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Admin ID")
    ),
    request_body = UpdateAdminStatus,
    responses(
        (status = 200, description = "Status updated", body = AdminResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_admin_status<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateAdminStatus>,
) -> AccountResult<Json<AdminResponse>> {
    let admin = service
        .update_admin_status(principal, id, input.status)
        .await?;

    AuditEvent::by(
        &principal,
        "admin.status",
        format!("admin:{}", id),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "status": admin.status }))
    .log();

    Ok(Json(admin))
}

/// Reset an admin's password to a generated temporary one
#[utoipa::path(
    post,
    path = "/admins/{id}/reset-password",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Admin ID")
    ),
    responses(
        (status = 200, description = "Temporary password, shown once", body = ResetPasswordResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reset_admin_password<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> AccountResult<Json<ResetPasswordResponse>> {
    let response = service.reset_admin_password(principal, id).await?;

    AuditEvent::by(
        &principal,
        "admin.reset_password",
        format!("admin:{}", id),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(Json(response))
}
