//! Mock credential validator for tests and local runs.
//!
//! ```ignore
//! let validator = MockCredentialValidator::new()
//!     .with_principal("token-a", Principal::new(UserId::new("user-a")?, "member"))
//!     .with_principal("token-admin", Principal::new(UserId::new("root")?, "admin"));
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};
use crate::ports::CredentialValidator;

/// Token table lookup. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockCredentialValidator {
    tokens: RwLock<HashMap<String, Principal>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockCredentialValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a principal.
    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), principal);
        self
    }

    /// Forces every validation to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }
}

#[async_trait]
impl CredentialValidator for MockCredentialValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn member(id: &str) -> Principal {
        Principal::new(UserId::new(id).unwrap(), "member")
    }

    #[tokio::test]
    async fn known_token_resolves() {
        let v = MockCredentialValidator::new().with_principal("t1", member("user-1"));
        let p = v.validate("t1").await.unwrap();
        assert_eq!(p.user_id.as_str(), "user-1");
        assert!(!p.is_admin());
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let v = MockCredentialValidator::new();
        assert_eq!(v.validate("nope").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let v = MockCredentialValidator::new()
            .with_principal("t1", member("user-1"))
            .with_error(AuthError::service_unavailable("down"));
        assert!(matches!(
            v.validate("t1").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }
}
