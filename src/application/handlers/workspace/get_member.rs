//! GetMemberHandler - Query handler for one membership row.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::foundation::{MemberId, Principal, WorkspaceId};
use crate::domain::workspace::WorkspaceError;
use crate::ports::{MemberView, WorkspaceRepository};

/// Query for a single member.
#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub workspace_id: WorkspaceId,
    pub member_id: MemberId,
}

/// Handler for fetching a member.
pub struct GetMemberHandler {
    guard: AccessGuard,
    repository: Arc<dyn WorkspaceRepository>,
}

impl GetMemberHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        query: GetMemberQuery,
        principal: &Principal,
    ) -> Result<MemberView, WorkspaceError> {
        self.guard
            .require_workspace(principal, query.workspace_id)
            .await?;

        let member = self
            .repository
            .find_member(query.workspace_id, query.member_id)
            .await?
            .ok_or_else(|| WorkspaceError::member_not_found(query.member_id))?;

        Ok(MemberView::from(&member))
    }
}
