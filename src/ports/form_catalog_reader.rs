//! Form type catalog reader port.

use async_trait::async_trait;

use crate::domain::form_catalog::FormType;
use crate::domain::foundation::{DomainError, FormTypeId, Page, PageRequest};

/// Columns catalog listings can sort on.
pub const FORM_TYPE_SORT_COLUMNS: &[&str] = &["code", "name", "created_at"];

/// Read access to the seeded form catalog.
#[async_trait]
pub trait FormCatalogReader: Send + Sync {
    /// Paged listing. Search matches the name.
    async fn list(&self, request: &PageRequest) -> Result<Page<FormType>, DomainError>;

    async fn find(&self, id: FormTypeId) -> Result<Option<FormType>, DomainError>;

    /// Whole catalog, for validating field types.
    async fn all(&self) -> Result<Vec<FormType>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_catalog_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn FormCatalogReader) {}
    }
}
