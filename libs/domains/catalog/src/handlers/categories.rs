use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

pub const TAG: &str = "categories";

/// OpenAPI documentation for the categories endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_categories, get_category, create_category, update_category, delete_category),
    components(
        schemas(Category, CategoryWithCount, CreateCategory, UpdateCategory),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product categories")
    )
)]
pub struct ApiDoc;

/// Create the categories router
pub fn router<C: CategoryRepository + 'static>(service: CategoryService<C>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .with_state(Arc::new(service))
}

/// List categories with their product counts
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Categories by name", body = Vec<CategoryWithCount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
) -> CatalogResult<Json<Vec<CategoryWithCount>>> {
    Ok(Json(service.list_categories().await?))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryWithCount),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<CategoryWithCount>> {
    Ok(Json(service.get_category(id).await?))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, description = "Parent category not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create_category(principal, input).await?;

    AuditEvent::by(&principal, "category.create", format!("category:{}", category.id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<Category>> {
    Ok(Json(service.update_category(principal, id, input).await?))
}

/// Delete a category; its products are detached
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CatalogResult<StatusCode> {
    service.delete_category(principal, id).await?;

    AuditEvent::by(&principal, "category.delete", format!("category:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
