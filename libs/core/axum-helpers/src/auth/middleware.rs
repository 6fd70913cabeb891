use super::{jwt::JwtAuth, principal::Principal};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bearer token from `Authorization`, falling back to the `access_token` cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.trim().to_string()))
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == "access_token").then(|| value.to_string())
                    })
                })
        })
}

/// Resolves the caller's [`Principal`] for every request.
///
/// - no token: the request continues anonymously
/// - valid token: the principal is inserted into request extensions
/// - invalid or expired token: 401, the request never reaches a handler
///
/// Whether a route needs a principal is decided by its handler extracting
/// `Principal` or `Option<Principal>`.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token_from_request(request.headers()) else {
        return next.run(request).await;
    };

    let principal = auth.verify(&token).and_then(|claims| {
        Principal::try_from(&claims).map_err(|e| eyre::eyre!("invalid subject: {}", e))
    });

    match principal {
        Ok(principal) => {
            tracing::debug!(principal_id = %principal.id, role = %principal.role, "Authenticated request");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
    }
}
