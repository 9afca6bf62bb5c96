//! WorkspaceSummaryHandler - Query handler for a workspace's totals.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::foundation::{Principal, WorkspaceId};
use crate::domain::reporting::WorkspaceSummary;
use crate::domain::workspace::WorkspaceError;
use crate::ports::SummaryReader;

#[derive(Debug, Clone)]
pub struct WorkspaceSummaryQuery {
    pub workspace_id: WorkspaceId,
}

/// Handler for live campaign and entry counts of a workspace.
pub struct WorkspaceSummaryHandler {
    guard: AccessGuard,
    reader: Arc<dyn SummaryReader>,
}

impl WorkspaceSummaryHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn SummaryReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: WorkspaceSummaryQuery,
        principal: &Principal,
    ) -> Result<WorkspaceSummary, WorkspaceError> {
        self.guard
            .require_workspace(principal, query.workspace_id)
            .await?;

        Ok(self.reader.workspace_summary(query.workspace_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::campaign::{DeleteCampaignCommand, DeleteCampaignHandler};
    use crate::application::handlers::test_support::{
        campaign, guard, store, submit, text_field, user, workspace,
    };

    #[tokio::test]
    async fn deleted_campaigns_and_their_entries_are_not_counted() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let kept = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let dropped = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        submit(&store, kept, None, "a").await;
        submit(&store, dropped, None, "b").await;
        submit(&store, dropped, None, "c").await;
        DeleteCampaignHandler::new(guard(&store), store.clone())
            .handle(
                DeleteCampaignCommand {
                    workspace_id: ws,
                    campaign_id: dropped,
                },
                &alice,
            )
            .await
            .unwrap();
        let handler = WorkspaceSummaryHandler::new(guard(&store), store.clone());

        let summary = handler
            .handle(WorkspaceSummaryQuery { workspace_id: ws }, &alice)
            .await
            .unwrap();

        assert_eq!(summary.total_campaign, 1);
        assert_eq!(summary.total_entry, 1);
    }

    #[tokio::test]
    async fn non_member_is_forbidden() {
        let store = store();
        let ws = workspace(&store, &user("alice")).await;
        let handler = WorkspaceSummaryHandler::new(guard(&store), store.clone());

        let result = handler
            .handle(WorkspaceSummaryQuery { workspace_id: ws }, &user("bob"))
            .await;

        assert!(matches!(result, Err(WorkspaceError::Forbidden)));
    }
}
