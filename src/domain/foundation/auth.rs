//! Authentication types for the domain layer.
//!
//! A [`Principal`] is what the credential service hands back after checking a
//! bearer token. Only two facts are trusted from the credential: who the caller
//! is and whether they hold the global admin role. Everything else is decided
//! by membership lookups at request time.

use super::{ErrorKind, UserId};
use thiserror::Error;

/// Role name that bypasses membership checks.
pub const ADMIN_ROLE: &str = "admin";

/// Caller identity resolved from a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Identifier issued by the credential service.
    pub user_id: UserId,

    /// Role name carried by the credential.
    pub role: String,
}

impl Principal {
    /// Creates a new principal.
    pub fn new(user_id: UserId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    /// True when the role is the global admin role, ignoring case.
    pub fn is_admin(&self) -> bool {
        self.role.trim().eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

/// Authentication errors that can occur during credential validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was presented.
    #[error("Missing credential")]
    MissingCredential,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The credential service itself failed.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Taxonomy kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::ServiceUnavailable(_) => ErrorKind::Unavailable,
            _ => ErrorKind::Unauthenticated,
        }
    }
}
