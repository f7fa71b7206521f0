use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use uuid::Uuid;

use super::model::Claims;
use crate::core::config::JwtConfig;
use crate::core::error::{AppError, Result};

/// Mints and verifies the HS256 access tokens handed out on register/login
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
    leeway: u64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self::from_secret(config.secret.as_bytes(), config.expiration, config.leeway)
    }

    pub fn from_secret(secret: &[u8], expiration: Duration, leeway: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_secs: expiration.as_secs() as i64,
            leeway: leeway.as_secs(),
        }
    }

    pub fn generate_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id,
            iat: now,
            exp: now + self.expiration_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::Internal(format!("Failed to sign token for user {}: {}", user_id, e))
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::Unauthorized("Unauthorized".to_string())
        })?;

        Ok(token_data.claims)
    }
}
