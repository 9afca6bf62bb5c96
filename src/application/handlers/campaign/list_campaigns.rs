//! ListCampaignsHandler - Query handler for a workspace's campaigns.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{Page, Principal, QueryParams, WorkspaceId};
use crate::ports::{CampaignReader, CampaignSummaryView, CAMPAIGN_SORT_COLUMNS};

/// Query to list campaigns. Search matches the title.
#[derive(Debug, Clone)]
pub struct ListCampaignsQuery {
    pub workspace_id: WorkspaceId,
    pub params: QueryParams,
}

/// Handler for listing campaigns with their entry counts.
pub struct ListCampaignsHandler {
    guard: AccessGuard,
    reader: Arc<dyn CampaignReader>,
}

impl ListCampaignsHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn CampaignReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: ListCampaignsQuery,
        principal: &Principal,
    ) -> Result<Page<CampaignSummaryView>, CampaignError> {
        let request = query.params.resolve(CAMPAIGN_SORT_COLUMNS)?;
        self.guard
            .require_workspace(principal, query.workspace_id)
            .await?;
        Ok(self.reader.list(query.workspace_id, &request).await?)
    }
}
