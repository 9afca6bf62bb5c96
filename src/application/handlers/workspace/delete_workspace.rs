//! DeleteWorkspaceHandler - Command handler for soft-deleting workspaces.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::foundation::{ErrorCode, Principal, WorkspaceId};
use crate::domain::workspace::WorkspaceError;
use crate::ports::WorkspaceRepository;

/// Command to soft-delete a workspace.
#[derive(Debug, Clone)]
pub struct DeleteWorkspaceCommand {
    pub workspace_id: WorkspaceId,
}

/// Handler for deleting workspaces. Campaigns are left as they are.
pub struct DeleteWorkspaceHandler {
    guard: AccessGuard,
    repository: Arc<dyn WorkspaceRepository>,
}

impl DeleteWorkspaceHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteWorkspaceCommand,
        principal: &Principal,
    ) -> Result<(), WorkspaceError> {
        self.guard
            .require_workspace(principal, cmd.workspace_id)
            .await?;

        self.repository
            .soft_delete(cmd.workspace_id)
            .await
            .map_err(|err| match err.code {
                ErrorCode::WorkspaceNotFound => WorkspaceError::not_found(cmd.workspace_id),
                _ => err.into(),
            })?;

        info!(workspace_id = %cmd.workspace_id, "Workspace deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{admin, guard, store, user, workspace};
    use crate::ports::AccessChecker;

    #[tokio::test]
    async fn deleted_workspace_revokes_access() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let handler = DeleteWorkspaceHandler::new(guard(&store), store.clone());

        handler
            .handle(DeleteWorkspaceCommand { workspace_id: ws }, &alice)
            .await
            .unwrap();

        assert!(store.find_by_id(ws).await.unwrap().is_none());
        assert!(!store.has_workspace_access(ws, &alice.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let store = store();
        let ws = workspace(&store, &user("alice")).await;
        let handler = DeleteWorkspaceHandler::new(guard(&store), store.clone());
        let cmd = DeleteWorkspaceCommand { workspace_id: ws };

        handler.handle(cmd.clone(), &admin()).await.unwrap();
        let result = handler.handle(cmd, &admin()).await;

        assert!(matches!(result, Err(WorkspaceError::NotFound(id)) if id == ws));
    }
}
