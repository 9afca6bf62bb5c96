//! Bearer-token middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → Principal in extensions
//!                                   ↓
//!                   RequireAuth / OptionalAuth extractors
//! ```
//!
//! A request without an `Authorization` header passes through untouched so
//! anonymous routes (public form preview and submission) can share the
//! layer; handlers that need a caller use [`RequireAuth`].
//!
//! # Example
//!
//! ```ignore
//! let validator: AuthState = Arc::new(JwtCredentialValidator::new(&config.auth));
//!
//! let app = Router::new()
//!     .route("/workspaces", get(list_workspaces))
//!     .layer(middleware::from_fn_with_state(validator, auth_middleware));
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, Principal};
use crate::ports::CredentialValidator;

/// Middleware state - the credential validator.
pub type AuthState = Arc<dyn CredentialValidator>;

/// Resolves `Authorization: Bearer <token>` into a [`Principal`].
///
/// - no header: continue anonymously
/// - valid token: insert the principal into request extensions
/// - bad token: 401, or 503 when the credential service is down
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).trim());

    let Some(token) = token else {
        return next.run(request).await;
    };

    if token.is_empty() {
        return auth_error_response(&AuthError::MissingCredential);
    }

    match validator.validate(token).await {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => auth_error_response(&e),
    }
}

fn auth_error_response(error: &AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingCredential => (StatusCode::UNAUTHORIZED, "Missing token"),
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Credential service unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
    };
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("Rejected credential: {}", error);
    }

    (
        status,
        Json(serde_json::json!({
            "error": message,
            "code": "AUTH_ERROR"
        })),
    )
        .into_response()
}

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for routes that also serve anonymous callers.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Principal>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<Principal>().cloned()))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "error": "Authentication required",
                    "code": "UNAUTHENTICATED"
                })),
            )
                .into_response(),
        }
    }
}
