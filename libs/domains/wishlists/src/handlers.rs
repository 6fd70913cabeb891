use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_helpers::{
    Principal, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::WishlistResult;
use crate::models::{AddToWishlist, WishlistCheck, WishlistEntry, WishlistItem};
use crate::repository::WishlistRepository;
use crate::service::WishlistService;

pub const TAG: &str = "wishlists";

/// OpenAPI documentation for the wishlist endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_wishlist, add_to_wishlist, clear_wishlist, check_product, remove_item),
    components(
        schemas(WishlistEntry, WishlistItem, AddToWishlist, WishlistCheck),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "The caller's wishlist")
    )
)]
pub struct ApiDoc;

/// Create the wishlist router
pub fn router<R: WishlistRepository + 'static>(service: WishlistService<R>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_wishlist)
                .post(add_to_wishlist)
                .delete(clear_wishlist),
        )
        .route("/check/{product_id}", get(check_product))
        .route("/{id}", delete(remove_item))
        .with_state(Arc::new(service))
}

/// The caller's wishlist with current product details
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wishlist, newest first", body = Vec<WishlistEntry>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_wishlist<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    principal: Principal,
) -> WishlistResult<Json<Vec<WishlistEntry>>> {
    Ok(Json(service.list(principal).await?))
}

/// Add a product to the caller's wishlist
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = AddToWishlist,
    responses(
        (status = 201, description = "Product added", body = WishlistItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_wishlist<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    principal: Principal,
    ValidatedJson(input): ValidatedJson<AddToWishlist>,
) -> WishlistResult<impl IntoResponse> {
    let item = service.add(principal, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove everything from the caller's wishlist
#[utoipa::path(
    delete,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Wishlist cleared"),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn clear_wishlist<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    principal: Principal,
) -> WishlistResult<StatusCode> {
    service.clear(principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Whether a product is on the caller's wishlist
#[utoipa::path(
    get,
    path = "/check/{product_id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Membership", body = WishlistCheck),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_product<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    principal: Principal,
    UuidPath(product_id): UuidPath,
) -> WishlistResult<Json<WishlistCheck>> {
    Ok(Json(service.check(principal, product_id).await?))
}

/// Remove one of the caller's wishlist rows
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Wishlist item ID")
    ),
    responses(
        (status = 204, description = "Item removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_item<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> WishlistResult<StatusCode> {
    service.remove(principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockWishlistRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_check_reports_membership() {
        let product_id = Uuid::now_v7();
        let mut repo = MockWishlistRepository::new();
        repo.expect_contains()
            .withf(move |_, product| *product == product_id)
            .returning(|_, _| Ok(true));

        let request = Request::builder()
            .uri(format!("/check/{}", product_id))
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(WishlistService::new(repo)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "in_wishlist": true }));
    }

    #[tokio::test]
    async fn test_check_with_bad_uuid_is_400() {
        let request = Request::builder()
            .uri("/check/not-a-uuid")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(WishlistService::new(MockWishlistRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clear_returns_no_content() {
        let mut repo = MockWishlistRepository::new();
        repo.expect_clear().returning(|_| Ok(3));

        let request = Request::builder()
            .method("DELETE")
            .uri("/")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(WishlistService::new(repo)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
