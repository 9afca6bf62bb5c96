//! DeleteCampaignEntryHandler - Command handler for soft-deleting a submission.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::form_entry::FormEntryError;
use crate::domain::foundation::{CampaignId, ErrorCode, FormEntryId, Principal, WorkspaceId};
use crate::ports::FormEntryRepository;

/// Command to remove a submission from a campaign.
#[derive(Debug, Clone)]
pub struct DeleteCampaignEntryCommand {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
    pub entry_id: FormEntryId,
}

/// Handler for deleting submissions. Detail rows are left untouched.
pub struct DeleteCampaignEntryHandler {
    guard: AccessGuard,
    repository: Arc<dyn FormEntryRepository>,
}

impl DeleteCampaignEntryHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn FormEntryRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCampaignEntryCommand,
        principal: &Principal,
    ) -> Result<(), FormEntryError> {
        self.guard
            .require_campaign(principal, cmd.workspace_id, cmd.campaign_id)
            .await?;

        self.repository
            .soft_delete(cmd.campaign_id, cmd.entry_id)
            .await
            .map_err(|err| match err.code {
                ErrorCode::FormEntryNotFound => FormEntryError::not_found(cmd.entry_id),
                _ => err.into(),
            })?;

        info!(
            entry_id = %cmd.entry_id,
            campaign_id = %cmd.campaign_id,
            "Form entry deleted"
        );
        Ok(())
    }
}
