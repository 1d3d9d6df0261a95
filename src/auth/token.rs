use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::models::User;

/// Errors building a token strategy
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,
}

/// Claims carried by an access token. The email is the stable identifying
/// claim; the full principal record is re-resolved from it on every
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Capability for minting and verifying bearer credentials
pub trait TokenStrategy: Send + Sync {
    fn create_token(&self, user: &User) -> Result<String, ApiError>;
    fn verify_token(&self, token: &str) -> Result<Claims, ApiError>;
}

/// HS256-signed JWTs with a server-held symmetric secret. Tokens carry an
/// expiry claim and verification enforces it along with the signature and
/// the algorithm.
pub struct JwtTokenStrategy {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expiry_hours: i64,
}

impl JwtTokenStrategy {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            expiry_hours: expiry_hours as i64,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }
}

impl TokenStrategy for JwtTokenStrategy {
    fn create_token(&self, user: &User) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Token generation failed: {}", e);
            ApiError::internal_server_error("Failed to create token")
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(self.algorithm);

        // Bad signature, wrong algorithm, malformed token and expired token
        // all collapse into the same client-facing failure
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            ApiError::unauthorized("Invalid token or expired token")
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn strategy() -> JwtTokenStrategy {
        JwtTokenStrategy::new("test-secret", 24).unwrap()
    }

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            user_id: Uuid::new_v4(),
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "5550100200".to_string(),
            role: crate::models::UserRole::Staff,
            hashed_password: "irrelevant".to_string(),
            restaurant_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn round_trip_preserves_subject() {
        let strategy = strategy();
        let user = sample_user();

        let token = strategy.create_token(&user).unwrap();
        let claims = strategy.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let strategy = strategy();
        let token = strategy.create_token(&sample_user()).unwrap();

        // Corrupt one byte of the signature segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let flipped = if sig.ends_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", &sig[..sig.len() - 1], flipped);
        let tampered = parts.join(".");
        assert_ne!(tampered, token);

        let err = strategy.verify_token(&tampered).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtTokenStrategy::new("other-secret", 24)
            .unwrap()
            .create_token(&sample_user())
            .unwrap();

        let err = strategy().verify_token(&token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = Claims {
            sub: "asha@example.com".to_string(),
            iat: (Utc::now() - chrono::Duration::hours(48)).timestamp(),
            exp: (Utc::now() - chrono::Duration::hours(24)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &expired,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = strategy().verify_token(&token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = strategy().verify_token("not-a-jwt").unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn empty_secret_is_a_construction_error() {
        assert!(JwtTokenStrategy::new("", 24).is_err());
    }
}
