use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    Principal, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CartResult;
use crate::models::{AddToCart, CartItem, CartLine, CartView, UpdateCartItem};
use crate::repository::CartRepository;
use crate::service::CartService;

pub const TAG: &str = "cart";

/// OpenAPI documentation for the cart endpoints
#[derive(OpenApi)]
#[openapi(
    paths(view_cart, add_to_cart, clear_cart, update_item, remove_item),
    components(
        schemas(CartView, CartLine, CartItem, AddToCart, UpdateCartItem),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "The caller's shopping cart")
    )
)]
pub struct ApiDoc;

/// Create the cart router
pub fn router<R: CartRepository + 'static>(service: CartService<R>) -> Router {
    Router::new()
        .route("/", get(view_cart).post(add_to_cart).delete(clear_cart))
        .route("/{id}", patch(update_item).delete(remove_item))
        .with_state(Arc::new(service))
}

/// The caller's cart with subtotals and total
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents", body = CartView),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn view_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    principal: Principal,
) -> CartResult<Json<CartView>> {
    Ok(Json(service.view(principal).await?))
}

/// Add a product; quantities merge with an existing row
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = AddToCart,
    responses(
        (status = 201, description = "Cart row after the add", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    principal: Principal,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> CartResult<impl IntoResponse> {
    let item = service.add(principal, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Empty the caller's cart
#[utoipa::path(
    delete,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Cart cleared"),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn clear_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    principal: Principal,
) -> CartResult<StatusCode> {
    service.clear(principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set the quantity of one of the caller's cart rows
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItem,
    responses(
        (status = 200, description = "Cart row updated", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCartItem>,
) -> CartResult<Json<CartItem>> {
    Ok(Json(service.update(principal, id, input).await?))
}

/// Remove one of the caller's cart rows
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart row removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> CartResult<StatusCode> {
    service.remove(principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
