//! Credential validation port.
//!
//! Resolves an opaque bearer credential into a [`Principal`]. The credential
//! format and signing scheme belong to the adapter; callers only ever see the
//! resolved user id and role.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

/// Resolves bearer credentials into principals.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient failures
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Validate a raw token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}
