//! Form catalog query handlers.

mod get_form_type;
mod list_form_types;

pub use get_form_type::{GetFormTypeHandler, GetFormTypeQuery};
pub use list_form_types::{ListFormTypesHandler, ListFormTypesQuery};
