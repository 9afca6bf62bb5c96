//! Credential validation adapters.
//!
//! - `jwt` - HS256 shared-secret tokens
//! - `mock` - token table for tests

mod jwt;
mod mock;

pub use jwt::{Claims, JwtCredentialValidator};
pub use mock::MockCredentialValidator;
