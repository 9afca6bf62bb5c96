//! In-process adapters.
//!
//! [`InMemoryStore`] implements every persistence port against one set of
//! tables held behind a lock. Writes run against a staged copy that replaces
//! the live tables only when the whole unit succeeds, so the same atomicity
//! contract as the Postgres adapters holds here.
//!
//! Used by handler tests, the integration suite and local runs without a
//! database.

mod campaign;
mod form_entry;
mod store;
mod workspace;

pub use store::{FailPoint, InMemoryStore};
