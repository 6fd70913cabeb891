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
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    CreateProduct, Product, ProductFilter, ProductPage, ProductSortField, ProductWithRating,
    SortOrder, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for the products endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        products_by_category,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product,
            ProductWithRating,
            ProductPage,
            ProductFilter,
            ProductSortField,
            SortOrder,
            CreateProduct,
            UpdateProduct
        ),
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
        (name = TAG, description = "Product catalog")
    )
)]
pub struct ApiDoc;

type SharedService<P, C> = State<Arc<ProductService<P, C>>>;

/// Create the products router
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/category/{id}", get(products_by_category))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .with_state(Arc::new(service))
}

/// List products with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    ValidatedQuery(filter): ValidatedQuery<ProductFilter>,
) -> CatalogResult<Json<ProductPage>> {
    Ok(Json(service.list_products(filter).await?))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductWithRating),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductWithRating>> {
    Ok(Json(service.get_product(id).await?))
}

/// Products in a category, newest first
#[utoipa::path(
    get,
    path = "/category/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductWithRating>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Vec<ProductWithRating>>> {
    Ok(Json(service.products_by_category(id).await?))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(principal, input).await?;

    AuditEvent::by(&principal, "product.create", format!("product:{}", product.id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    principal: Principal,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    Ok(Json(service.update_product(principal, id, input).await?))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid UUID, or the product is referenced by orders"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CatalogResult<StatusCode> {
    service.delete_product(principal, id).await?;

    AuditEvent::by(&principal, "product.delete", format!("product:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
