//! Domain layer - pure business logic with no infrastructure dependencies.

pub mod campaign;
pub mod form_catalog;
pub mod form_entry;
pub mod foundation;
pub mod reporting;
pub mod workspace;
