//! HS256 bearer-token validator.
//!
//! Tokens are signed with a shared secret and carry `id` (user id),
//! `role_name` and `exp`. Issuing tokens is the credential service's job;
//! this adapter only verifies them.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, Principal, UserId};
use crate::ports::CredentialValidator;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: String,
    /// Role name; `admin` bypasses membership checks.
    #[serde(default)]
    pub role_name: String,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

/// Validates HS256 tokens signed with the configured secret.
pub struct JwtCredentialValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCredentialValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl CredentialValidator for JwtCredentialValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidSignature => {
                    tracing::warn!("Token signature mismatch");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let user_id = UserId::new(data.claims.id).map_err(|_| {
            tracing::warn!("Token carries an empty user id");
            AuthError::InvalidToken
        })?;

        Ok(Principal::new(user_id, data.claims.role_name))
    }
}
