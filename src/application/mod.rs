//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Every workspace or campaign scoped handler authorizes through
//! [`AccessGuard`] before touching a repository.

mod authorization;
pub mod handlers;

pub use authorization::AccessGuard;
