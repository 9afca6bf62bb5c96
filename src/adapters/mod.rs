//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - bearer-token validation (JWT, mock)
//! - `http` - axum middleware and extractors
//! - `memory` - in-process store implementing every persistence port
//! - `postgres` - sqlx implementations of the persistence ports

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtCredentialValidator, MockCredentialValidator};
pub use memory::{FailPoint, InMemoryStore};
