use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AccountResult;
use crate::models::{CreateUser, UpdateUser, UserFilter, UserResponse};
use crate::repository::{AdminRepository, UserRepository};
use crate::service::AccountService;

pub const TAG: &str = "users";

/// OpenAPI documentation for admin-side user management
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, UserFilter),
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
        (name = TAG, description = "Shopper accounts, admin only")
    )
)]
pub struct ApiDoc;

type SharedService<U, A> = State<Arc<AccountService<U, A>>>;

/// Create the user management router
pub fn router<U, A>(service: AccountService<U, A>) -> Router
where
    U: UserRepository + 'static,
    A: AdminRepository + 'static,
{
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(Arc::new(service))
}

/// List users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(UserFilter),
    responses(
        (status = 200, description = "Users", body = Vec<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    ValidatedQuery(filter): ValidatedQuery<UserFilter>,
) -> AccountResult<Json<Vec<UserResponse>>> {
    Ok(Json(service.list_users(principal, filter).await?))
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> AccountResult<impl IntoResponse> {
    let user = service.create_user(principal, input).await?;

    AuditEvent::by(&principal, "user.create", format!("user:{}", user.id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> AccountResult<Json<UserResponse>> {
    Ok(Json(service.get_user(principal, id).await?))
}

/// Update a user; a new password is re-hashed
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> AccountResult<Json<UserResponse>> {
    let user = service.update_user(principal, id, input).await?;

    AuditEvent::by(&principal, "user.update", format!("user:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, description = "User still has orders or payments"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<U: UserRepository, A: AdminRepository>(
    State(service): SharedService<U, A>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> AccountResult<StatusCode> {
    service.delete_user(principal, id).await?;

    AuditEvent::by(&principal, "user.delete", format!("user:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockAdminRepository, MockUserRepository};
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::{JwtAuth, JwtConfig};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(users: MockUserRepository) -> Router {
        let jwt = JwtAuth::new(&JwtConfig::new("handler-tests-secret-with-32-characters"));
        router(AccountService::new(users, MockAdminRepository::new(), jwt))
    }

    #[tokio::test]
    async fn test_get_missing_user_is_404() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));

        let request = Request::builder()
            .uri(format!("/{}", Uuid::now_v7()))
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app(users).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_400() {
        let request = Request::builder()
            .uri("/not-a-uuid")
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app(MockUserRepository::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_user_as_admin_is_204() {
        let mut users = MockUserRepository::new();
        users.expect_delete().returning(|_| Ok(true));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", Uuid::now_v7()))
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app(users).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_list_users_limit_out_of_range_is_400() {
        let request = Request::builder()
            .uri("/?limit=500")
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app(MockUserRepository::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
