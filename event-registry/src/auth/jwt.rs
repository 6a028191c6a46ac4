//! JWT token service
//!
//! Verifies bearer tokens issued by the identity provider. Token generation
//! exists for operator tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::permissions::Permission;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret
    pub secret: String,
    /// Token lifetime (minutes)
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
}

/// Claims carried in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (Subject)
    pub sub: String,
    /// Role name
    pub role: String,
    /// Permission list (comma separated)
    pub permissions: String,
    /// Expiry timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("expiration_minutes", &self.config.expiration_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a token for a user
    pub fn generate_token(
        &self,
        user_id: i64,
        role: &str,
        permissions: &[Permission],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let permissions_str = permissions
            .iter()
            .map(Permission::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            permissions: permissions_str,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated caller (parsed from JWT claims)
///
/// Inserted into request extensions by [`super::require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID (raw `sub`)
    pub id: String,
    pub role: String,
    pub permissions: Vec<Permission>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        let permissions = claims
            .permissions
            .split(',')
            .filter_map(Permission::parse)
            .collect();

        Self {
            id: claims.sub,
            role: claims.role,
            permissions,
        }
    }
}

impl CurrentUser {
    /// Numeric user id, when `sub` is one
    pub fn user_id(&self) -> Option<i64> {
        self.id.parse().ok()
    }

    pub fn is_superadmin(&self) -> bool {
        self.permissions.contains(&Permission::SuperAdmin)
    }

    /// Check a permission
    ///
    /// Any verified token satisfies `Authenticated`; `SuperAdmin` satisfies everything.
    pub fn has_permission(&self, permission: Permission) -> bool {
        permission == Permission::Authenticated
            || self.is_superadmin()
            || self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-with-at-least-32-characters!".into(),
            expiration_minutes: 5,
            issuer: "event-registry".into(),
        })
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let token = service
            .generate_token(
                7,
                "administrator",
                &[Permission::ReadCatalog, Permission::UpdateCatalog],
            )
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, "administrator");
        assert_eq!(claims.permissions, "ReadCatalog,UpdateCatalog");
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let token = service().generate_token(7, "customer", &[]).unwrap();
        let other = JwtService::with_config(JwtConfig {
            issuer: "someone-else".into(),
            ..service().config
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service().generate_token(7, "customer", &[]).unwrap();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-with-at-least-32-chars!!".into(),
            ..service().config
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_current_user_permissions() {
        let user = CurrentUser {
            id: "1".into(),
            role: "administrator".into(),
            permissions: vec![Permission::ReadCatalog],
        };
        assert!(user.has_permission(Permission::Authenticated));
        assert!(user.has_permission(Permission::ReadCatalog));
        assert!(!user.has_permission(Permission::UpdateCatalog));
        assert_eq!(user.user_id(), Some(1));
    }

    #[test]
    fn test_superadmin_has_all_permissions() {
        let user = CurrentUser::from(Claims {
            sub: "root".into(),
            role: "administrator".into(),
            permissions: "SuperAdmin".into(),
            exp: 0,
            iat: 0,
            iss: "event-registry".into(),
        });
        assert!(user.has_permission(Permission::UpdateCatalog));
        assert_eq!(user.user_id(), None);
    }
}
