//! CreateWorkspaceHandler - Command handler for creating workspaces.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{ErrorCode, Principal};
use crate::domain::workspace::{Workspace, WorkspaceError, WorkspaceMember};
use crate::ports::WorkspaceRepository;

use crate::application::handlers::KEY_ATTEMPTS;

/// Command to create a workspace.
#[derive(Debug, Clone)]
pub struct CreateWorkspaceCommand {
    pub title: String,
    pub description: String,
    pub is_publish: bool,
}

/// Handler for creating workspaces. The creator becomes the owner.
pub struct CreateWorkspaceHandler {
    repository: Arc<dyn WorkspaceRepository>,
}

impl CreateWorkspaceHandler {
    pub fn new(repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateWorkspaceCommand,
        principal: &Principal,
    ) -> Result<Workspace, WorkspaceError> {
        for attempt in 1..=KEY_ATTEMPTS {
            let workspace = Workspace::new(&cmd.title, cmd.description.clone(), cmd.is_publish)?;
            let owner = WorkspaceMember::owner(workspace.id(), principal.user_id.clone());

            match self.repository.create_with_owner(&workspace, &owner).await {
                Ok(()) => {
                    info!(
                        workspace_id = %workspace.id(),
                        key = workspace.key(),
                        owner = %principal.user_id,
                        "Workspace created"
                    );
                    return Ok(workspace);
                }
                Err(err) if err.code == ErrorCode::DuplicateKey => {
                    warn!(attempt, key = workspace.key(), "Workspace key collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(WorkspaceError::conflict(
            "could not allocate a unique workspace key",
        ))
    }
}
