//! ListMembersHandler - Query handler for a workspace roster.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::foundation::{Page, Principal, QueryParams, WorkspaceId};
use crate::domain::workspace::WorkspaceError;
use crate::ports::{MemberView, WorkspaceReader, MEMBER_SORT_COLUMNS};

/// Query to list members of a workspace. Search matches the user id.
#[derive(Debug, Clone)]
pub struct ListMembersQuery {
    pub workspace_id: WorkspaceId,
    pub params: QueryParams,
}

/// Handler for listing members.
pub struct ListMembersHandler {
    guard: AccessGuard,
    reader: Arc<dyn WorkspaceReader>,
}

impl ListMembersHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn WorkspaceReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: ListMembersQuery,
        principal: &Principal,
    ) -> Result<Page<MemberView>, WorkspaceError> {
        let request = query.params.resolve(MEMBER_SORT_COLUMNS)?;
        self.guard
            .require_workspace(principal, query.workspace_id)
            .await?;
        Ok(self.reader.list_members(query.workspace_id, &request).await?)
    }
}
