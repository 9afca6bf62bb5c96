//! GetFormTypeHandler - Query handler for one catalog entry.

use std::sync::Arc;

use crate::domain::campaign::CampaignError;
use crate::domain::form_catalog::FormType;
use crate::domain::foundation::FormTypeId;
use crate::ports::FormCatalogReader;

/// Query for one form type.
#[derive(Debug, Clone)]
pub struct GetFormTypeQuery {
    pub form_type_id: FormTypeId,
}

/// Handler for fetching a form type.
pub struct GetFormTypeHandler {
    reader: Arc<dyn FormCatalogReader>,
}

impl GetFormTypeHandler {
    pub fn new(reader: Arc<dyn FormCatalogReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetFormTypeQuery) -> Result<FormType, CampaignError> {
        self.reader
            .find(query.form_type_id)
            .await?
            .ok_or(CampaignError::FormTypeNotFound(query.form_type_id))
    }
}
