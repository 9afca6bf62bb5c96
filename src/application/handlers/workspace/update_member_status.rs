//! UpdateMemberStatusHandler - Command handler for moving a member between statuses.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::foundation::{MemberId, Principal, WorkspaceId};
use crate::domain::workspace::{MembershipStatus, WorkspaceError, WorkspaceMember};
use crate::ports::WorkspaceRepository;

/// Command to change a membership status.
#[derive(Debug, Clone)]
pub struct UpdateMemberStatusCommand {
    pub workspace_id: WorkspaceId,
    pub member_id: MemberId,
    pub status: MembershipStatus,
}

/// Handler for approving, rejecting or otherwise re-labelling members.
pub struct UpdateMemberStatusHandler {
    guard: AccessGuard,
    repository: Arc<dyn WorkspaceRepository>,
}

impl UpdateMemberStatusHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMemberStatusCommand,
        principal: &Principal,
    ) -> Result<WorkspaceMember, WorkspaceError> {
        self.guard
            .require_workspace(principal, cmd.workspace_id)
            .await?;

        let mut member = self
            .repository
            .find_member(cmd.workspace_id, cmd.member_id)
            .await?
            .ok_or_else(|| WorkspaceError::member_not_found(cmd.member_id))?;

        member.change_status(cmd.status);
        self.repository.update_member(&member).await?;

        info!(
            workspace_id = %cmd.workspace_id,
            member_id = %cmd.member_id,
            status = %cmd.status,
            "Workspace member status changed"
        );
        Ok(member)
    }
}
