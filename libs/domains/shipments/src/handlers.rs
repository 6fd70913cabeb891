use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestRuleResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ShipmentResult;
use crate::models::{CreateShipment, Shipment, ShipmentFilter, ShipmentStatus, UpdateShipment};
use crate::repository::ShipmentRepository;
use crate::service::ShipmentService;

pub const TAG: &str = "shipments";

/// OpenAPI documentation for the shipments endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        create_shipment,
        list_shipments,
        track_shipment,
        get_shipment,
        update_shipment,
        delete_shipment,
    ),
    components(
        schemas(Shipment, ShipmentStatus, CreateShipment, UpdateShipment),
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
        (name = TAG, description = "Order shipments and tracking")
    )
)]
pub struct ApiDoc;

/// Create the shipments router
pub fn router<R: ShipmentRepository + 'static>(service: ShipmentService<R>) -> Router {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route("/track/{tracking_number}", get(track_shipment))
        .route(
            "/{id}",
            get(get_shipment)
                .patch(update_shipment)
                .delete(delete_shipment),
        )
        .with_state(Arc::new(service))
}

/// Create a shipment for an order (admin)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateShipment,
    responses(
        (status = 201, description = "Shipment created", body = Shipment),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_shipment<R: ShipmentRepository>(
    State(service): State<Arc<ShipmentService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateShipment>,
) -> ShipmentResult<impl IntoResponse> {
    let shipment = service.create(principal, input).await?;

    AuditEvent::by(&principal, "shipment.create", format!("shipment:{}", shipment.id), AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "order_id": shipment.order_id, "status": shipment.status }))
        .log();

    Ok((StatusCode::CREATED, Json(shipment)))
}

/// List shipments, optionally for one order (admin)
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(ShipmentFilter),
    responses(
        (status = 200, description = "Shipments, most recently shipped first", body = Vec<Shipment>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_shipments<R: ShipmentRepository>(
    State(service): State<Arc<ShipmentService<R>>>,
    principal: Principal,
    ValidatedQuery(filter): ValidatedQuery<ShipmentFilter>,
) -> ShipmentResult<Json<Vec<Shipment>>> {
    Ok(Json(service.list(principal, filter).await?))
}

/// Look a shipment up by tracking number
#[utoipa::path(
    get,
    path = "/track/{tracking_number}",
    tag = TAG,
    params(
        ("tracking_number" = String, Path, description = "Carrier tracking number")
    ),
    responses(
        (status = 200, description = "Shipment found", body = Shipment),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn track_shipment<R: ShipmentRepository>(
    State(service): State<Arc<ShipmentService<R>>>,
    Path(tracking_number): Path<String>,
) -> ShipmentResult<Json<Shipment>> {
    Ok(Json(service.track(&tracking_number).await?))
}

/// Get a shipment by ID (admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Shipment found", body = Shipment),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_shipment<R: ShipmentRepository>(
    State(service): State<Arc<ShipmentService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> ShipmentResult<Json<Shipment>> {
    Ok(Json(service.get(principal, id).await?))
}

/// Update carrier, tracking number or status (admin)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    request_body = UpdateShipment,
    responses(
        (status = 200, description = "Shipment updated", body = Shipment),
        (status = 400, response = BadRequestRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_shipment<R: ShipmentRepository>(
    State(service): State<Arc<ShipmentService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateShipment>,
) -> ShipmentResult<Json<Shipment>> {
    let shipment = service.update(principal, id, input).await?;

    AuditEvent::by(&principal, "shipment.update", format!("shipment:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "status": shipment.status }))
        .log();

    Ok(Json(shipment))
}

/// Delete a shipment (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 204, description = "Shipment deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_shipment<R: ShipmentRepository>(
    State(service): State<Arc<ShipmentService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ShipmentResult<StatusCode> {
    service.delete(principal, id).await?;

    AuditEvent::by(&principal, "shipment.delete", format!("shipment:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
