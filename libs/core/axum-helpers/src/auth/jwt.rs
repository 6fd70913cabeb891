use super::config::JwtConfig;
use super::principal::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Token lifetime when `JWT_TTL_SECS` is unset (one day)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User or admin id
    pub sub: String,
    pub email: String,
    /// Which table `sub` refers to
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Stateless HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    secret: Arc<str>,
    ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.ttl_secs, "JWT auth initialized");
        Self {
            secret: Arc::from(config.secret.as_str()),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Sign an access token for `subject`
    pub fn issue(&self, subject: Uuid, email: &str, role: Role) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            role,
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256"))
    }

    #[test]
    fn test_issue_and_verify() {
        let auth = auth();
        let id = Uuid::now_v7();

        let token = auth.issue(id, "ada@example.com", Role::Admin).unwrap();
        let claims = auth.verify(&token).unwrap();

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-long-enough-too"));
        let token = other.issue(Uuid::now_v7(), "a@b.c", Role::User).unwrap();

        assert!(auth().verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let expired = JwtAuth::new(
            &JwtConfig::new("test-secret-that-is-long-enough-for-hs256").with_ttl_secs(-3600),
        );
        let token = expired.issue(Uuid::now_v7(), "a@b.c", Role::User).unwrap();

        assert!(auth().verify(&token).is_err());
    }
}
