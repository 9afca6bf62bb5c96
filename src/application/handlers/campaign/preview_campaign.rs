//! PreviewCampaignHandler - Public lookup of a published campaign by short key.

use std::sync::Arc;

use crate::domain::campaign::CampaignError;
use crate::ports::{CampaignDetail, CampaignReader, CampaignRepository};

/// Query for the anonymous form preview.
#[derive(Debug, Clone)]
pub struct PreviewCampaignQuery {
    pub key: String,
}

/// Handler for the public preview. No principal is needed; unpublished
/// campaigns are reported as missing.
pub struct PreviewCampaignHandler {
    repository: Arc<dyn CampaignRepository>,
    reader: Arc<dyn CampaignReader>,
}

impl PreviewCampaignHandler {
    pub fn new(repository: Arc<dyn CampaignRepository>, reader: Arc<dyn CampaignReader>) -> Self {
        Self { repository, reader }
    }

    pub async fn handle(&self, query: PreviewCampaignQuery) -> Result<CampaignDetail, CampaignError> {
        let key = query.key.trim();
        let campaign = self
            .repository
            .find_by_key(key, Some(true))
            .await?
            .ok_or_else(|| CampaignError::key_not_found(key))?;
        let forms = self.reader.forms_by_campaign(campaign.id()).await?;

        Ok(CampaignDetail { campaign, forms })
    }
}
