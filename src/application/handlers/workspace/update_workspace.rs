//! UpdateWorkspaceHandler - Command handler for editing workspace details.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::foundation::{Principal, WorkspaceId};
use crate::domain::workspace::{Workspace, WorkspaceError};
use crate::ports::WorkspaceRepository;

/// Command to replace a workspace's editable details.
#[derive(Debug, Clone)]
pub struct UpdateWorkspaceCommand {
    pub workspace_id: WorkspaceId,
    pub title: String,
    pub description: String,
    pub is_publish: bool,
}

/// Handler for updating workspaces.
pub struct UpdateWorkspaceHandler {
    guard: AccessGuard,
    repository: Arc<dyn WorkspaceRepository>,
}

impl UpdateWorkspaceHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateWorkspaceCommand,
        principal: &Principal,
    ) -> Result<Workspace, WorkspaceError> {
        self.guard
            .require_workspace(principal, cmd.workspace_id)
            .await?;

        let mut workspace = self
            .repository
            .find_by_id(cmd.workspace_id)
            .await?
            .ok_or_else(|| WorkspaceError::not_found(cmd.workspace_id))?;

        workspace.update_details(&cmd.title, cmd.description, cmd.is_publish)?;
        self.repository.update(&workspace).await?;

        info!(workspace_id = %workspace.id(), "Workspace updated");
        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{guard, store, user, workspace};

    fn command(workspace_id: WorkspaceId, title: &str) -> UpdateWorkspaceCommand {
        UpdateWorkspaceCommand {
            workspace_id,
            title: title.to_string(),
            description: "Renamed".to_string(),
            is_publish: false,
        }
    }

    #[tokio::test]
    async fn owner_can_rename_and_slug_follows() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let handler = UpdateWorkspaceHandler::new(guard(&store), store.clone());

        let updated = handler.handle(command(ws, "New Name"), &alice).await.unwrap();

        assert_eq!(updated.slug(), "new-name");
        assert!(!updated.is_publish());
        let stored = store.find_by_id(ws).await.unwrap().unwrap();
        assert_eq!(stored.title(), "New Name");
    }

    #[tokio::test]
    async fn outsider_is_forbidden() {
        let store = store();
        let ws = workspace(&store, &user("alice")).await;
        let handler = UpdateWorkspaceHandler::new(guard(&store), store.clone());

        let result = handler.handle(command(ws, "Hijack"), &user("mallory")).await;

        assert!(matches!(result, Err(WorkspaceError::Forbidden)));
        let stored = store.find_by_id(ws).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Acme");
    }
}
