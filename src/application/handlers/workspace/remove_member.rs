//! RemoveMemberHandler - Command handler for soft-deleting a membership.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::foundation::{MemberId, Principal, WorkspaceId};
use crate::domain::workspace::WorkspaceError;
use crate::ports::WorkspaceRepository;

/// Command to remove a member from a workspace.
#[derive(Debug, Clone)]
pub struct RemoveMemberCommand {
    pub workspace_id: WorkspaceId,
    pub member_id: MemberId,
}

/// Handler for removing members.
pub struct RemoveMemberHandler {
    guard: AccessGuard,
    repository: Arc<dyn WorkspaceRepository>,
}

impl RemoveMemberHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: RemoveMemberCommand,
        principal: &Principal,
    ) -> Result<(), WorkspaceError> {
        self.guard
            .require_workspace(principal, cmd.workspace_id)
            .await?;

        // Scope the id to the workspace before deleting.
        if self
            .repository
            .find_member(cmd.workspace_id, cmd.member_id)
            .await?
            .is_none()
        {
            return Err(WorkspaceError::member_not_found(cmd.member_id));
        }

        self.repository.soft_delete_member(cmd.member_id).await?;

        info!(
            workspace_id = %cmd.workspace_id,
            member_id = %cmd.member_id,
            "Workspace member removed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{guard, store, user, workspace};
    use crate::domain::workspace::{MembershipStatus, WorkspaceMember};
    use crate::ports::AccessChecker;

    #[tokio::test]
    async fn removed_member_loses_access() {
        let store = store();
        let alice = user("alice");
        let bob = user("bob");
        let ws = workspace(&store, &alice).await;
        let member = WorkspaceMember::new(ws, bob.user_id.clone(), MembershipStatus::Approved);
        store.add_member(&member).await.unwrap();
        let handler = RemoveMemberHandler::new(guard(&store), store.clone());

        handler
            .handle(
                RemoveMemberCommand {
                    workspace_id: ws,
                    member_id: member.id(),
                },
                &alice,
            )
            .await
            .unwrap();

        assert!(!store.has_workspace_access(ws, &bob.user_id).await.unwrap());
        assert!(store
            .find_member_by_user(ws, &bob.user_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn member_of_another_workspace_is_not_found() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let other = workspace(&store, &user("carol")).await;
        let stranger = WorkspaceMember::new(
            other,
            user("dave").user_id,
            MembershipStatus::Approved,
        );
        store.add_member(&stranger).await.unwrap();
        let handler = RemoveMemberHandler::new(guard(&store), store.clone());

        let result = handler
            .handle(
                RemoveMemberCommand {
                    workspace_id: ws,
                    member_id: stranger.id(),
                },
                &alice,
            )
            .await;

        assert!(matches!(result, Err(WorkspaceError::MemberNotFound(_))));
    }
}
