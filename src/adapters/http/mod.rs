//! HTTP adapters.
//!
//! - `middleware` - bearer-token authentication

pub mod middleware;

pub use middleware::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
