//! ListFormTypesHandler - Query handler for the seeded field-type catalog.

use std::sync::Arc;

use crate::domain::campaign::CampaignError;
use crate::domain::form_catalog::FormType;
use crate::domain::foundation::{Page, QueryParams};
use crate::ports::{FormCatalogReader, FORM_TYPE_SORT_COLUMNS};

/// Query to list form types. Search matches the name.
#[derive(Debug, Clone, Default)]
pub struct ListFormTypesQuery {
    pub params: QueryParams,
}

/// Handler for listing form types. The catalog is public reference data.
pub struct ListFormTypesHandler {
    reader: Arc<dyn FormCatalogReader>,
}

impl ListFormTypesHandler {
    pub fn new(reader: Arc<dyn FormCatalogReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListFormTypesQuery) -> Result<Page<FormType>, CampaignError> {
        let request = query.params.resolve(FORM_TYPE_SORT_COLUMNS)?;
        Ok(self.reader.list(&request).await?)
    }
}
