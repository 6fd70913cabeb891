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
        BadRequestRuleResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PaymentResult;
use crate::models::{CreatePayment, Payment, PaymentFilter, PaymentStatus, UpdatePayment};
use crate::repository::PaymentRepository;
use crate::service::PaymentService;

pub const TAG: &str = "payments";

/// OpenAPI documentation for the payments endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        create_payment,
        list_payments,
        my_payments,
        get_payment,
        update_payment,
        delete_payment,
    ),
    components(
        schemas(Payment, PaymentStatus, CreatePayment, UpdatePayment),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestRuleResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Payments against orders")
    )
)]
pub struct ApiDoc;

/// Create the payments router
pub fn router<R: PaymentRepository + 'static>(service: PaymentService<R>) -> Router {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/my-payments", get(my_payments))
        .route(
            "/{id}",
            get(get_payment).patch(update_payment).delete(delete_payment),
        )
        .with_state(Arc::new(service))
}

/// Record a payment for one of the caller's orders
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_payment<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePayment>,
) -> PaymentResult<impl IntoResponse> {
    let payment = service.create(principal, input).await?;

    AuditEvent::by(&principal, "payment.create", format!("payment:{}", payment.id), AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({
            "order_id": payment.order_id,
            "amount": payment.amount,
            "status": payment.status,
        }))
        .log();

    Ok((StatusCode::CREATED, Json(payment)))
}

/// List payments, optionally for one order (admin)
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(PaymentFilter),
    responses(
        (status = 200, description = "Payments, most recently paid first", body = Vec<Payment>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_payments<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    principal: Principal,
    ValidatedQuery(filter): ValidatedQuery<PaymentFilter>,
) -> PaymentResult<Json<Vec<Payment>>> {
    Ok(Json(service.list(principal, filter).await?))
}

/// The caller's payments
#[utoipa::path(
    get,
    path = "/my-payments",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's payments", body = Vec<Payment>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn my_payments<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    principal: Principal,
) -> PaymentResult<Json<Vec<Payment>>> {
    Ok(Json(service.my_payments(principal).await?))
}

/// Get a payment the caller owns (admins see all)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_payment<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> PaymentResult<Json<Payment>> {
    Ok(Json(service.get(principal, id).await?))
}

/// Update a payment; status changes must follow the lifecycle (admin)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    request_body = UpdatePayment,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 400, response = BadRequestRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_payment<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdatePayment>,
) -> PaymentResult<Json<Payment>> {
    let payment = service.update(principal, id, input).await?;

    AuditEvent::by(&principal, "payment.update", format!("payment:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "status": payment.status }))
        .log();

    Ok(Json(payment))
}

/// Delete a payment (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_payment<R: PaymentRepository>(
    State(service): State<Arc<PaymentService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> PaymentResult<StatusCode> {
    service.delete(principal, id).await?;

    AuditEvent::by(&principal, "payment.delete", format!("payment:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockPaymentRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_with_zero_amount_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::from(
                json!({
                    "order_id": Uuid::now_v7(),
                    "amount": 0,
                    "method": "credit_card"
                })
                .to_string(),
            ))
            .unwrap();

        let response = router(PaymentService::new(MockPaymentRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let user_id = Uuid::now_v7();
        let mut repo = MockPaymentRepository::new();
        repo.expect_order_owner()
            .returning(move |_| Ok(Some(user_id)));
        repo.expect_create().returning(Ok);

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .extension(Principal::user(user_id))
            .body(Body::from(
                json!({
                    "order_id": Uuid::now_v7(),
                    "amount": 42.5,
                    "method": "paypal"
                })
                .to_string(),
            ))
            .unwrap();

        let response = router(PaymentService::new(repo)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "pending");
        assert!(body["paid_at"].is_null());
    }

    #[tokio::test]
    async fn test_list_filters_by_order() {
        let order_id = Uuid::now_v7();
        let mut repo = MockPaymentRepository::new();
        repo.expect_list()
            .withf(move |filter| *filter == Some(order_id))
            .returning(|_| Ok(vec![]));

        let request = Request::builder()
            .uri(format!("/?orderId={}", order_id))
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(PaymentService::new(repo)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_cannot_delete() {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", Uuid::now_v7()))
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(PaymentService::new(MockPaymentRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
