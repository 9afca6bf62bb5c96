//! ListCampaignEntriesHandler - Query handler for the submissions a campaign received.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::form_entry::FormEntryError;
use crate::domain::foundation::{CampaignId, Page, Principal, QueryParams, WorkspaceId};
use crate::ports::{EntryView, FormEntryReader, ENTRY_SORT_COLUMNS};

/// Query for a campaign's submissions. Search matches the submitter id.
#[derive(Debug, Clone)]
pub struct ListCampaignEntriesQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
    pub params: QueryParams,
}

/// Handler for the workspace-side entry listing, oldest first.
pub struct ListCampaignEntriesHandler {
    guard: AccessGuard,
    reader: Arc<dyn FormEntryReader>,
}

impl ListCampaignEntriesHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn FormEntryReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: ListCampaignEntriesQuery,
        principal: &Principal,
    ) -> Result<Page<EntryView>, FormEntryError> {
        let request = query.params.resolve(ENTRY_SORT_COLUMNS)?;
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;
        Ok(self
            .reader
            .list_by_campaign(query.campaign_id, &request)
            .await?)
    }
}
