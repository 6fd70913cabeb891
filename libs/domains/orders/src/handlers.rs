use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestRuleResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, Order, OrderItem, OrderLine, OrderStatus, ShippingDetails, UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

pub const TAG: &str = "orders";

/// OpenAPI documentation for the orders endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        place_order,
        place_from_cart,
        list_orders,
        my_orders,
        get_order,
        update_status,
        delete_order,
    ),
    components(
        schemas(
            Order,
            OrderItem,
            OrderLine,
            OrderStatus,
            CreateOrder,
            ShippingDetails,
            UpdateOrderStatus
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestRuleResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Order placement and lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the orders router
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    Router::new()
        .route("/", get(list_orders).post(place_order))
        .route("/from-cart", post(place_from_cart))
        .route("/my-orders", get(my_orders))
        .route(
            "/{id}",
            get(get_order).patch(update_status).delete(delete_order),
        )
        .with_state(Arc::new(service))
}

fn audit_placement(principal: &Principal, order: &Order, headers: &HeaderMap) {
    AuditEvent::by(
        principal,
        "order.place",
        format!("order:{}", order.id),
        AuditOutcome::Success,
    )
    .with_request(headers)
    .with_details(json!({
        "total_amount": order.total_amount,
        "items": order.items.len(),
    }))
    .log();
}

/// Place an order from explicit line items
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, response = BadRequestRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn place_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.place(principal, input).await?;
    audit_placement(&principal, &order, &headers);
    Ok((StatusCode::CREATED, Json(order)))
}

/// Place an order from the caller's cart and empty the cart
#[utoipa::path(
    post,
    path = "/from-cart",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = ShippingDetails,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, response = BadRequestRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn place_from_cart<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ShippingDetails>,
) -> OrderResult<impl IntoResponse> {
    let order = service.place_from_cart(principal, input).await?;
    audit_placement(&principal, &order, &headers);
    Ok((StatusCode::CREATED, Json(order)))
}

/// Every order, newest first (admin)
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders", body = Vec<Order>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.list_all(principal).await?))
}

/// The caller's orders, newest first
#[utoipa::path(
    get,
    path = "/my-orders",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's orders", body = Vec<Order>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn my_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
) -> OrderResult<Json<Vec<Order>>> {
    Ok(Json(service.my_orders(principal).await?))
}

/// Get an order the caller owns (admins see all)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<Order>> {
    Ok(Json(service.get(principal, id).await?))
}

/// Move an order along its lifecycle (admin)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, response = BadRequestRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_status<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderResult<Json<Order>> {
    let order = service.update_status(principal, id, input.status).await?;

    AuditEvent::by(&principal, "order.status", format!("order:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "status": order.status }))
        .log();

    Ok(Json(order))
}

/// Delete an order with its items, payments and shipments (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> OrderResult<StatusCode> {
    service.delete(principal, id).await?;

    AuditEvent::by(&principal, "order.delete", format!("order:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderError;
    use crate::repository::MockOrderRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn json_request(
        method: &str,
        uri: &str,
        principal: Principal,
        body: serde_json::Value,
    ) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .extension(principal)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_order_without_items_is_400() {
        let request = json_request(
            "POST",
            "/",
            Principal::user(Uuid::now_v7()),
            json!({
                "payment_method": "credit_card",
                "shipping_method": "standard",
                "shipping_address": "1 Main St",
                "items": []
            }),
        );

        let response = router(OrderService::new(MockOrderRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_insufficient_stock_names_product() {
        let mut repo = MockOrderRepository::new();
        repo.expect_place().returning(|draft| {
            Err(OrderError::InsufficientStock {
                product_id: draft.lines[0].product_id,
                product_name: "Desk Lamp".to_string(),
            })
        });

        let request = json_request(
            "POST",
            "/",
            Principal::user(Uuid::now_v7()),
            json!({
                "payment_method": "credit_card",
                "shipping_method": "standard",
                "shipping_address": "1 Main St",
                "items": [{ "product_id": Uuid::now_v7(), "quantity": 3, "price": 100.0 }]
            }),
        );

        let response = router(OrderService::new(repo)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Insufficient stock for product Desk Lamp");
    }

    #[tokio::test]
    async fn test_empty_cart_is_400() {
        let mut repo = MockOrderRepository::new();
        repo.expect_place_from_cart()
            .returning(|_, _| Err(OrderError::EmptyCart));

        let request = json_request(
            "POST",
            "/from-cart",
            Principal::user(Uuid::now_v7()),
            json!({
                "payment_method": "credit_card",
                "shipping_method": "standard",
                "shipping_address": "1 Main St"
            }),
        );

        let response = router(OrderService::new(repo)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_listing_all_orders_needs_admin() {
        let request = Request::builder()
            .uri("/")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(OrderService::new(MockOrderRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected() {
        let request = json_request(
            "PATCH",
            &format!("/{}", Uuid::now_v7()),
            Principal::admin(Uuid::now_v7()),
            json!({ "status": "lost" }),
        );

        let response = router(OrderService::new(MockOrderRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_my_orders_is_not_shadowed_by_id_route() {
        let user_id = Uuid::now_v7();
        let mut repo = MockOrderRepository::new();
        repo.expect_list()
            .withf(move |filter| *filter == Some(user_id))
            .returning(|_| Ok(vec![]));

        let request = Request::builder()
            .uri("/my-orders")
            .extension(Principal::user(user_id))
            .body(Body::empty())
            .unwrap();

        let response = router(OrderService::new(repo)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}
