//! Audit trail for security-relevant actions.
//!
//! Events go to the `audit` tracing target so they can be routed separately
//! from application logs (see `core_config::tracing::DEFAULT_LOG_FILTER`).
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new(Some(principal.id), "order.place", Some(format!("order:{}", order.id)), AuditOutcome::Success)
//!     .with_role(principal.role)
//!     .with_details(json!({ "total_amount": order.total_amount }))
//!     .log();
//! ```

use crate::auth::{Principal, Role};
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Rejected by a business rule or bad input
    Failure,
    /// Rejected for lack of credentials or role
    Denied,
}

/// One audited action.
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Acting user or admin, `None` before authentication
    pub actor_id: Option<Uuid>,
    pub actor_role: Option<Role>,
    /// Dotted action name, e.g. `auth.login`, `order.place`, `payment.update`
    pub action: String,
    /// `kind:id`, e.g. `order:0190...`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        actor_id: Option<Uuid>,
        action: impl Into<String>,
        resource: Option<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            actor_id,
            actor_role: None,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Shorthand for an action performed by an authenticated caller.
    pub fn by(
        principal: &Principal,
        action: impl Into<String>,
        resource: impl Into<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self::new(Some(principal.id), action, Some(resource.into()), outcome)
            .with_role(principal.role)
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.actor_role = Some(role);
        self
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Attach request metadata (client IP and user agent) from headers.
    pub fn with_request(self, headers: &HeaderMap) -> Self {
        self.with_ip(extract_ip_from_headers(headers))
            .with_user_agent(extract_user_agent(headers))
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        tracing::info!(
            target: "audit",
            actor_id = ?self.actor_id,
            actor_role = ?self.actor_role,
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// Client IP from `X-Forwarded-For` (first hop) or `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        assert_eq!(
            extract_ip_from_headers(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        assert_eq!(
            extract_ip_from_headers(&headers),
            Some("10.0.0.2".to_string())
        );
        assert_eq!(extract_ip_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_event_by_principal() {
        let principal = Principal::admin(Uuid::now_v7());
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("curl/8.0"));

        let event = AuditEvent::by(&principal, "product.delete", "product:1", AuditOutcome::Success)
            .with_request(&headers);

        assert_eq!(event.actor_id, Some(principal.id));
        assert_eq!(event.actor_role, Some(Role::Admin));
        assert_eq!(event.resource.as_deref(), Some("product:1"));
        assert_eq!(event.user_agent.as_deref(), Some("curl/8.0"));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["actor_role"], "admin");
    }
}
