use std::env;
use std::fmt;

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    Missing { secret_name: String },
    TooShort { secret_name: String, minimum: usize, actual: usize },
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::TooShort { secret_name, minimum, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, minimum, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Centralized manager for application secrets.
///
/// Loaded once at startup so a missing or weak secret fails fast instead
/// of surfacing as a request-time error.
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
    session_token_secret: String,
}

const MIN_SECRET_LENGTH: usize = 32;

impl SecretManager {
    /// Initialize the SecretManager by loading and validating all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or too short
    pub fn init() -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret("JWT_SECRET")?;
        let password_pepper = Self::load_secret("PASSWORD_PEPPER")?;
        let session_token_secret = Self::load_secret("SESSION_TOKEN_SECRET")?;

        Ok(Self {
            jwt_secret,
            password_pepper,
            session_token_secret,
        })
    }

    fn load_secret(name: &str) -> Result<String, SecretError> {
        let value = env::var(name).map_err(|_| SecretError::Missing {
            secret_name: name.to_string(),
        })?;

        if value.len() < MIN_SECRET_LENGTH {
            return Err(SecretError::TooShort {
                secret_name: name.to_string(),
                minimum: MIN_SECRET_LENGTH,
                actual: value.len(),
            });
        }

        Ok(value)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub fn session_token_secret(&self) -> &str {
        &self.session_token_secret
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("session_token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::ENV_TEST_MUTEX;

    #[test]
    fn init_fails_when_secret_missing() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("JWT_SECRET");
        std::env::remove_var("PASSWORD_PEPPER");
        std::env::remove_var("SESSION_TOKEN_SECRET");

        let result = SecretManager::init();
        assert!(matches!(result, Err(SecretError::Missing { .. })));
    }

    #[test]
    fn init_fails_when_secret_too_short() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("JWT_SECRET", "short");
        std::env::set_var("PASSWORD_PEPPER", "test-pepper-minimum-32-characters-xx");
        std::env::set_var("SESSION_TOKEN_SECRET", "test-session-secret-minimum-32-chars");

        let result = SecretManager::init();
        assert!(matches!(result, Err(SecretError::TooShort { .. })));

        std::env::remove_var("JWT_SECRET");
        std::env::remove_var("PASSWORD_PEPPER");
        std::env::remove_var("SESSION_TOKEN_SECRET");
    }

    #[test]
    fn debug_does_not_expose_secrets() {
        let manager = SecretManager {
            jwt_secret: "super-secret-jwt-key-minimum-32-chars".to_string(),
            password_pepper: "super-secret-pepper-minimum-32-chars".to_string(),
            session_token_secret: "super-secret-session-minimum-32-char".to_string(),
        };

        let debug_output = format!("{:?}", manager);
        assert!(!debug_output.contains("super-secret"));
        assert_eq!(debug_output.matches("<redacted>").count(), 3);
    }
}
