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
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ContactResult;
use crate::models::{Contact, ContactStatus, ContactType, CreateContact, UpdateContact};
use crate::repository::ContactRepository;
use crate::service::ContactService;

pub const TAG: &str = "contacts";

/// OpenAPI documentation for the contacts endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        submit_contact,
        list_contacts,
        my_contacts,
        get_contact,
        update_contact,
        delete_contact,
    ),
    components(
        schemas(Contact, ContactType, ContactStatus, CreateContact, UpdateContact),
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
        (name = TAG, description = "Contact form submissions")
    )
)]
pub struct ApiDoc;

/// Create the contacts router
pub fn router<R: ContactRepository + 'static>(service: ContactService<R>) -> Router {
    Router::new()
        .route("/", get(list_contacts).post(submit_contact))
        .route("/my-contacts", get(my_contacts))
        .route(
            "/{id}",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .with_state(Arc::new(service))
}

/// Send a message; no account needed
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateContact,
    responses(
        (status = 201, description = "Message received", body = Contact),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn submit_contact<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    principal: Option<Principal>,
    ValidatedJson(input): ValidatedJson<CreateContact>,
) -> ContactResult<impl IntoResponse> {
    let contact = service.submit(principal, input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Every submission, newest first (admin)
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All messages", body = Vec<Contact>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_contacts<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    principal: Principal,
) -> ContactResult<Json<Vec<Contact>>> {
    Ok(Json(service.list(principal).await?))
}

/// Messages the caller sent while signed in
#[utoipa::path(
    get,
    path = "/my-contacts",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's messages", body = Vec<Contact>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn my_contacts<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    principal: Principal,
) -> ContactResult<Json<Vec<Contact>>> {
    Ok(Json(service.my_contacts(principal).await?))
}

/// Get a message by ID (admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Contact message ID")
    ),
    responses(
        (status = 200, description = "Message found", body = Contact),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_contact<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    principal: Principal,
    UuidPath(id): UuidPath,
) -> ContactResult<Json<Contact>> {
    Ok(Json(service.get(principal, id).await?))
}

/// Set status and response (admin)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Contact message ID")
    ),
    request_body = UpdateContact,
    responses(
        (status = 200, description = "Message updated", body = Contact),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_contact<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateContact>,
) -> ContactResult<Json<Contact>> {
    let contact = service.update(principal, id, input).await?;

    AuditEvent::by(&principal, "contact.update", format!("contact:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "status": contact.status }))
        .log();

    Ok(Json(contact))
}

/// Delete a message (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Contact message ID")
    ),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_contact<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ContactResult<StatusCode> {
    service.delete(principal, id).await?;

    AuditEvent::by(&principal, "contact.delete", format!("contact:{}", id), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
