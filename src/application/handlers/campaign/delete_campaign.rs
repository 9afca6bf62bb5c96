//! DeleteCampaignHandler - Command handler for soft-deleting a campaign.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{CampaignId, ErrorCode, Principal, WorkspaceId};
use crate::ports::CampaignRepository;

/// Command to soft-delete a campaign.
#[derive(Debug, Clone)]
pub struct DeleteCampaignCommand {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
}

/// Handler for deleting campaigns.
///
/// Only the header is flagged. Fields, options and entries keep their rows so
/// submission history stays readable.
pub struct DeleteCampaignHandler {
    guard: AccessGuard,
    repository: Arc<dyn CampaignRepository>,
}

impl DeleteCampaignHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn CampaignRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCampaignCommand,
        principal: &Principal,
    ) -> Result<(), CampaignError> {
        self.guard
            .require_campaign(principal, cmd.workspace_id, cmd.campaign_id)
            .await?;

        if self
            .repository
            .find_in_workspace(cmd.workspace_id, cmd.campaign_id)
            .await?
            .is_none()
        {
            return Err(CampaignError::not_found(cmd.campaign_id));
        }

        self.repository
            .soft_delete(cmd.campaign_id)
            .await
            .map_err(|err| match err.code {
                ErrorCode::CampaignNotFound => CampaignError::not_found(cmd.campaign_id),
                _ => err.into(),
            })?;

        info!(campaign_id = %cmd.campaign_id, "Campaign deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        admin, campaign, guard, store, text_field, user, workspace,
    };
    use crate::ports::CampaignReader;

    #[tokio::test]
    async fn deleted_campaign_leaves_reads_but_keeps_field_rows() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let handler = DeleteCampaignHandler::new(guard(&store), store.clone());

        handler
            .handle(
                DeleteCampaignCommand {
                    workspace_id: ws,
                    campaign_id: id,
                },
                &alice,
            )
            .await
            .unwrap();

        assert!(CampaignRepository::find(store.as_ref(), id)
            .await
            .unwrap()
            .is_none());
        let listed = CampaignReader::list(store.as_ref(), ws, &Default::default())
            .await
            .unwrap();
        assert_eq!(listed.total, 0);
        assert!(store.raw_fields(id).iter().all(|(_, deleted)| !deleted));
    }

    #[tokio::test]
    async fn admin_deleting_missing_campaign_gets_not_found() {
        let store = store();
        let ws = workspace(&store, &user("alice")).await;
        let handler = DeleteCampaignHandler::new(guard(&store), store.clone());
        let missing = CampaignId::new();

        let result = handler
            .handle(
                DeleteCampaignCommand {
                    workspace_id: ws,
                    campaign_id: missing,
                },
                &admin(),
            )
            .await;

        assert!(matches!(result, Err(CampaignError::NotFound(id)) if id == missing));
    }
}
