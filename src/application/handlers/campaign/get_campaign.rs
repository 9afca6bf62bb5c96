//! GetCampaignHandler - Query handler for a campaign with its ordered schema.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{CampaignId, Principal, WorkspaceId};
use crate::ports::{CampaignDetail, CampaignReader, CampaignRepository};

/// Query for one campaign.
#[derive(Debug, Clone)]
pub struct GetCampaignQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
}

/// Handler for fetching a campaign.
pub struct GetCampaignHandler {
    guard: AccessGuard,
    repository: Arc<dyn CampaignRepository>,
    reader: Arc<dyn CampaignReader>,
}

impl GetCampaignHandler {
    pub fn new(
        guard: AccessGuard,
        repository: Arc<dyn CampaignRepository>,
        reader: Arc<dyn CampaignReader>,
    ) -> Self {
        Self {
            guard,
            repository,
            reader,
        }
    }

    pub async fn handle(
        &self,
        query: GetCampaignQuery,
        principal: &Principal,
    ) -> Result<CampaignDetail, CampaignError> {
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;

        let campaign = self
            .repository
            .find_in_workspace(query.workspace_id, query.campaign_id)
            .await?
            .ok_or_else(|| CampaignError::not_found(query.campaign_id))?;
        let forms = self.reader.forms_by_campaign(query.campaign_id).await?;

        Ok(CampaignDetail { campaign, forms })
    }
}
