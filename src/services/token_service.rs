use std::fmt;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::errors::internal::CryptoError;
use crate::errors::InternalError;
use crate::services::crypto;
use crate::types::db::user;
use crate::types::internal::auth::Claims;

/// Why a presented JWT was rejected
#[derive(Debug, PartialEq, Eq)]
pub enum TokenRejection {
    Expired,
    Invalid,
}

/// Manages signed identity tokens and session token hashing.
///
/// The JWT in the `token` cookie carries identity and role; the session
/// table holds an HMAC of the same token so it can be revoked server-side.
pub struct TokenService {
    jwt_secret: String,
    session_token_secret: String,
    jwt_expiration_hours: i64,
}

impl TokenService {
    /// Create a new TokenService with the given secrets
    pub fn new(jwt_secret: String, session_token_secret: String) -> Self {
        Self {
            jwt_secret,
            session_token_secret,
            jwt_expiration_hours: 24,
        }
    }

    /// Generate a JWT for the given user
    ///
    /// # Returns
    /// * `Result<String, InternalError>` - The encoded JWT or a signing error
    pub fn generate_jwt(&self, user: &user::Model) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let expiration = now + self.jwt_expiration_hours * 60 * 60;

        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            exp: expiration,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            InternalError::Crypto(CryptoError::TokenSigning(format!(
                "Failed to generate JWT: {}",
                e
            )))
        })
    }

    /// Validate a JWT and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, TokenRejection> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            _ => TokenRejection::Invalid,
        })?;

        Ok(token_data.claims)
    }

    /// Hash a token for session storage using HMAC-SHA256
    pub fn hash_session_token(&self, token: &str) -> String {
        crypto::hmac_sha256_token(&self.session_token_secret, token)
    }

    /// Expiration timestamp for a session created now
    pub fn session_expiration(&self) -> i64 {
        Utc::now().timestamp() + self.jwt_expiration_hours * 60 * 60
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("session_token_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::Role;

    fn test_service() -> TokenService {
        TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            "test-session-secret-minimum-32-chars".to_string(),
        )
    }

    fn test_user(role: Role) -> user::Model {
        let now = Utc::now().timestamp();
        user::Model {
            id: Uuid::new_v4().to_string(),
            first_name: "Nino".to_string(),
            last_name: "Beridze".to_string(),
            email: "nino@example.com".to_string(),
            phone_number: "+995500000000".to_string(),
            role,
            is_active: true,
            banned: false,
            ban_reason: None,
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn generated_jwt_round_trips() {
        let service = test_service();
        let user = test_user(Role::Teacher);

        let token = service.generate_jwt(&user).unwrap();
        let claims = service.validate_jwt(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn validation_fails_with_wrong_secret() {
        let service = test_service();
        let other = TokenService::new(
            "wrong-secret-key-minimum-32-characters".to_string(),
            "test-session-secret-minimum-32-chars".to_string(),
        );

        let token = service.generate_jwt(&test_user(Role::Student)).unwrap();
        assert_eq!(other.validate_jwt(&token), Err(TokenRejection::Invalid));
    }

    #[test]
    fn validation_fails_with_expired_token() {
        let service = test_service();
        let now = Utc::now().timestamp();

        let expired_claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Student,
            exp: now - 3600,
            iat: now - 7200,
            jti: Uuid::new_v4().to_string(),
        };

        let expired_token = encode(
            &Header::new(Algorithm::HS256),
            &expired_claims,
            &EncodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
        )
        .unwrap();

        assert_eq!(
            service.validate_jwt(&expired_token),
            Err(TokenRejection::Expired)
        );
    }

    #[test]
    fn session_hash_is_stable_and_keyed() {
        let service = test_service();
        let token = service.generate_jwt(&test_user(Role::Student)).unwrap();

        assert_eq!(
            service.hash_session_token(&token),
            service.hash_session_token(&token)
        );

        let other = TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            "other-session-secret-minimum-32-char".to_string(),
        );
        assert_ne!(
            service.hash_session_token(&token),
            other.hash_session_token(&token)
        );
    }

    #[test]
    fn debug_does_not_expose_secrets() {
        let service = test_service();
        let debug_output = format!("{:?}", service);

        assert!(!debug_output.contains("test-secret-key"));
        assert!(!debug_output.contains("test-session-secret"));
        assert!(debug_output.contains("<redacted>"));
    }
}
