use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    Principal, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ReviewResult;
use crate::models::{CreateReview, Review, ReviewFilter, UpdateReview};
use crate::repository::ReviewRepository;
use crate::service::ReviewService;

pub const TAG: &str = "reviews";

/// OpenAPI documentation for the reviews endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        create_review,
        list_reviews,
        my_reviews,
        get_review,
        update_review,
        delete_review,
    ),
    components(
        schemas(Review, CreateReview, UpdateReview),
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
        (name = TAG, description = "Product reviews")
    )
)]
pub struct ApiDoc;

/// Create the reviews router
pub fn router<R: ReviewRepository + 'static>(service: ReviewService<R>) -> Router {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/my-reviews", get(my_reviews))
        .route(
            "/{id}",
            get(get_review).patch(update_review).delete(delete_review),
        )
        .with_state(Arc::new(service))
}

/// Review a product, once per user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    principal: Principal,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> ReviewResult<impl IntoResponse> {
    let review = service.create(principal, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// List reviews, optionally for one product
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ReviewFilter),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<ReviewFilter>,
) -> ReviewResult<Json<Vec<Review>>> {
    Ok(Json(service.list(filter).await?))
}

/// The caller's reviews
#[utoipa::path(
    get,
    path = "/my-reviews",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's reviews", body = Vec<Review>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn my_reviews<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    principal: Principal,
) -> ReviewResult<Json<Vec<Review>>> {
    Ok(Json(service.my_reviews(principal).await?))
}

/// Get a review by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    UuidPath(id): UuidPath,
) -> ReviewResult<Json<Review>> {
    Ok(Json(service.get(id).await?))
}

/// Change the caller's own review
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> ReviewResult<Json<Review>> {
    Ok(Json(service.update(principal, id, input).await?))
}

/// Delete the caller's own review
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> ReviewResult<StatusCode> {
    service.delete(principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use crate::repository::MockReviewRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_listing_is_public() {
        let product_id = Uuid::now_v7();
        let mut repo = MockReviewRepository::new();
        repo.expect_list()
            .withf(move |filter| *filter == Some(product_id))
            .returning(|_| Ok(vec![]));

        let request = Request::builder()
            .uri(format!("/?productId={}", product_id))
            .body(Body::empty())
            .unwrap();

        let response = router(ReviewService::new(repo)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_review_message() {
        let mut repo = MockReviewRepository::new();
        repo.expect_product_exists().returning(|_| Ok(true));
        repo.expect_has_reviewed().returning(|_, _| Ok(true));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::from(
                json!({ "product_id": Uuid::now_v7(), "rating": 5 }).to_string(),
            ))
            .unwrap();

        let response = router(ReviewService::new(repo)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], ReviewError::AlreadyReviewed.to_string());
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::from(
                json!({ "product_id": Uuid::now_v7(), "rating": 9 }).to_string(),
            ))
            .unwrap();

        let response = router(ReviewService::new(MockReviewRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "product_id": Uuid::now_v7(), "rating": 4 }).to_string(),
            ))
            .unwrap();

        let response = router(ReviewService::new(MockReviewRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
