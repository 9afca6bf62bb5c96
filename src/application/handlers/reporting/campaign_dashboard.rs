//! CampaignDashboardHandler - Query handler for a campaign's headline numbers.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{CampaignId, Principal, WorkspaceId};
use crate::domain::reporting::CampaignDashboard;
use crate::ports::SummaryReader;

#[derive(Debug, Clone)]
pub struct CampaignDashboardQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
}

/// Handler for submission and estimated visitor totals.
pub struct CampaignDashboardHandler {
    guard: AccessGuard,
    reader: Arc<dyn SummaryReader>,
}

impl CampaignDashboardHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn SummaryReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: CampaignDashboardQuery,
        principal: &Principal,
    ) -> Result<CampaignDashboard, CampaignError> {
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;

        let total_submit = self
            .reader
            .count_entries_by_campaign(query.campaign_id)
            .await?;
        Ok(CampaignDashboard::from_submissions(total_submit))
    }
}
