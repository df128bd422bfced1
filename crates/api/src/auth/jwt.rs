//! Steward access-token generation and validation.
//!
//! Steward tokens are HS256-signed JWTs carrying a `typ` claim so that a
//! token minted for one audience can never be replayed against another.
//! Admin access uses opaque session cookies instead (see [`crate::auth::session`]).

use aquareport_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token audience marker for steward tokens.
pub const TOKEN_TYPE_STEWARD: &str = "steward";

/// JWT claims embedded in every steward access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StewardClaims {
    /// Subject -- the steward's internal database id.
    pub sub: DbId,
    /// Token audience marker; always `"steward"`.
    pub typ: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Steward token lifetime in hours (default: 24).
    pub steward_token_expiry_hours: i64,
}

const DEFAULT_STEWARD_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `JWT_SECRET`                | **yes**  | --      |
    /// | `JWT_STEWARD_EXPIRY_HOURS`  | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let steward_token_expiry_hours: i64 = std::env::var("JWT_STEWARD_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_STEWARD_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_STEWARD_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            steward_token_expiry_hours,
        }
    }
}

/// Generate an HS256 access token for a steward.
pub fn generate_steward_token(
    steward_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.steward_token_expiry_hours * 3600;

    let claims = StewardClaims {
        sub: steward_id,
        typ: TOKEN_TYPE_STEWARD.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a steward token, returning the embedded claims.
///
/// Rejects tokens whose `typ` claim is not `"steward"` even when the
/// signature is valid.
pub fn validate_steward_token(
    token: &str,
    config: &JwtConfig,
) -> Result<StewardClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<StewardClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    if token_data.claims.typ != TOKEN_TYPE_STEWARD {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            steward_token_expiry_hours: 24,
        }
    }

    #[test]
    fn test_generate_and_validate_steward_token() {
        let config = test_config();
        let token =
            generate_steward_token(42, &config).expect("token generation should succeed");

        let claims =
            validate_steward_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.typ, TOKEN_TYPE_STEWARD);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token, past the 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = StewardClaims {
            sub: 1,
            typ: TOKEN_TYPE_STEWARD.to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_steward_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_wrong_type_marker_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = StewardClaims {
            sub: 1,
            typ: "admin".to_string(),
            exp: now + 3600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_steward_token(&token, &config);
        assert!(result.is_err(), "non-steward token must be rejected");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            steward_token_expiry_hours: 24,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            steward_token_expiry_hours: 24,
        };

        let token =
            generate_steward_token(1, &config_a).expect("token generation should succeed");

        let result = validate_steward_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }
}
