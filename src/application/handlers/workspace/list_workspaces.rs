//! ListWorkspacesHandler - Query handler for the caller's workspaces.

use std::sync::Arc;

use crate::domain::foundation::{Page, Principal, QueryParams};
use crate::domain::workspace::WorkspaceError;
use crate::ports::{WorkspaceReader, WorkspaceView, WORKSPACE_SORT_COLUMNS};

/// Query to list workspaces.
#[derive(Debug, Clone, Default)]
pub struct ListWorkspacesQuery {
    pub params: QueryParams,
}

/// Handler for listing workspaces.
///
/// Admins see every live workspace; everyone else sees the ones they hold an
/// approved or owner membership in.
pub struct ListWorkspacesHandler {
    reader: Arc<dyn WorkspaceReader>,
}

impl ListWorkspacesHandler {
    pub fn new(reader: Arc<dyn WorkspaceReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListWorkspacesQuery,
        principal: &Principal,
    ) -> Result<Page<WorkspaceView>, WorkspaceError> {
        let request = query.params.resolve(WORKSPACE_SORT_COLUMNS)?;
        let member = (!principal.is_admin()).then_some(&principal.user_id);
        Ok(self.reader.list(member, &request).await?)
    }
}
