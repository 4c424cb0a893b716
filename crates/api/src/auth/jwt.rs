//! Session token issue and validation.
//!
//! Tokens are HS256-signed JWTs carrying the account id and the resolved
//! role. The role decides which account table the id refers to.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quickcart_core::error::CoreError;
use quickcart_core::roles::Role;
use quickcart_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id within the table implied by `role`.
    pub sub: DbId,
    pub role: Role,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 24).
    pub expiry_hours: i64,
}

const DEFAULT_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Session lifetime in seconds, used for both `exp` and the cookie `Max-Age`.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Issue a session token for an account with its resolved role.
pub fn generate_token(
    account_id: DbId,
    role: Role,
    config: &JwtConfig,
) -> Result<String, CoreError> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: account_id,
        role,
        exp: now + config.expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| CoreError::Internal(format!("Failed to sign session token: {e}")))
}

/// Verify signature and expiry and return the claims.
///
/// An expired token yields [`CoreError::TokenExpired`]; any other failure
/// (bad signature, malformed, unknown role) yields [`CoreError::TokenInvalid`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, CoreError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => CoreError::TokenExpired,
        _ => CoreError::TokenInvalid,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn issued_token_validates() {
        let config = test_config();
        let token = generate_token(42, Role::Seller, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Seller);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: Role::User,
            // Well past the default 60-second leeway.
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = sign(&claims, &config.secret);
        assert_matches!(validate_token(&token, &config), Err(CoreError::TokenExpired));
    }

    #[test]
    fn foreign_secret_is_invalid() {
        let token = generate_token(1, Role::User, &test_config()).unwrap();
        let other = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_hours: 24,
        };
        assert_matches!(validate_token(&token, &other), Err(CoreError::TokenInvalid));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_matches!(
            validate_token("not.a.jwt", &test_config()),
            Err(CoreError::TokenInvalid)
        );
    }

    #[test]
    fn unknown_role_claim_is_invalid() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": 1,
            "role": "superuser",
            "exp": now + 600,
            "iat": now,
            "jti": "x",
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert_matches!(validate_token(&token, &config), Err(CoreError::TokenInvalid));
    }
}
