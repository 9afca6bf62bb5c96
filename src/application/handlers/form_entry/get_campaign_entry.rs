//! GetCampaignEntryHandler - Query handler for one submission of a campaign.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::form_entry::FormEntryError;
use crate::domain::foundation::{CampaignId, FormEntryId, Principal, WorkspaceId};
use crate::ports::{EntryDetail, FormEntryReader};

/// Query for one entry of a campaign.
#[derive(Debug, Clone)]
pub struct GetCampaignEntryQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
    pub entry_id: FormEntryId,
}

/// Handler for the workspace-side entry detail.
pub struct GetCampaignEntryHandler {
    guard: AccessGuard,
    reader: Arc<dyn FormEntryReader>,
}

impl GetCampaignEntryHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn FormEntryReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: GetCampaignEntryQuery,
        principal: &Principal,
    ) -> Result<EntryDetail, FormEntryError> {
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;

        self.reader
            .find_in_campaign(query.campaign_id, query.entry_id)
            .await?
            .ok_or_else(|| FormEntryError::not_found(query.entry_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        campaign, guard, store, submit, text_field, user, workspace,
    };

    #[tokio::test]
    async fn entry_is_scoped_to_its_campaign() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let a = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let b = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let entry_id = submit(&store, a, None, "anon").await;
        let handler = GetCampaignEntryHandler::new(guard(&store), store.clone());

        let found = handler
            .handle(
                GetCampaignEntryQuery {
                    workspace_id: ws,
                    campaign_id: a,
                    entry_id,
                },
                &alice,
            )
            .await
            .unwrap();
        let wrong = handler
            .handle(
                GetCampaignEntryQuery {
                    workspace_id: ws,
                    campaign_id: b,
                    entry_id,
                },
                &alice,
            )
            .await;

        assert_eq!(found.entry.id, entry_id);
        assert!(found.entry.user_id.is_none());
        assert!(matches!(wrong, Err(FormEntryError::NotFound(_))));
    }
}
