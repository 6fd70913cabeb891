use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Which kind of account a token was issued for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Returned by [`Principal::require_admin`] for non-admin callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Admin role required")]
pub struct AdminRequired;

/// The authenticated caller.
///
/// Handlers extract it and hand it to services explicitly. Extracting
/// `Principal` answers 401 when no valid token was presented;
/// `Option<Principal>` never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn user(id: Uuid) -> Self {
        Self { id, role: Role::User }
    }

    pub fn admin(id: Uuid) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AdminRequired> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AdminRequired)
        }
    }

    /// Admins see everything; users only what they own
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.id == owner_id
    }
}

impl TryFrom<&JwtClaims> for Principal {
    type Error = uuid::Error;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&claims.sub)?,
            role: claims.role,
        })
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

impl<S> OptionalFromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Principal>().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_as_lowercase() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_require_admin() {
        let id = Uuid::now_v7();
        assert!(Principal::admin(id).require_admin().is_ok());
        assert_eq!(Principal::user(id).require_admin(), Err(AdminRequired));
    }

    #[test]
    fn test_can_access_owner_or_admin() {
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();

        assert!(Principal::user(owner).can_access(owner));
        assert!(!Principal::user(stranger).can_access(owner));
        assert!(Principal::admin(stranger).can_access(owner));
    }

    #[test]
    fn test_try_from_claims_rejects_bad_subject() {
        let claims = JwtClaims {
            sub: "42".to_string(),
            email: "a@b.c".to_string(),
            role: Role::User,
            exp: 0,
            iat: 0,
            jti: String::new(),
        };
        assert!(Principal::try_from(&claims).is_err());
    }
}
