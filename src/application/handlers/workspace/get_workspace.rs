//! GetWorkspaceHandler - Query handler for one workspace with its counts.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::foundation::{Principal, WorkspaceId};
use crate::domain::workspace::WorkspaceError;
use crate::ports::{WorkspaceReader, WorkspaceView};

/// Query for a single workspace.
#[derive(Debug, Clone)]
pub struct GetWorkspaceQuery {
    pub workspace_id: WorkspaceId,
}

/// Handler for fetching a workspace.
pub struct GetWorkspaceHandler {
    guard: AccessGuard,
    reader: Arc<dyn WorkspaceReader>,
}

impl GetWorkspaceHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn WorkspaceReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: GetWorkspaceQuery,
        principal: &Principal,
    ) -> Result<WorkspaceView, WorkspaceError> {
        self.guard
            .require_workspace(principal, query.workspace_id)
            .await?;

        self.reader
            .get(query.workspace_id)
            .await?
            .ok_or_else(|| WorkspaceError::not_found(query.workspace_id))
    }
}
