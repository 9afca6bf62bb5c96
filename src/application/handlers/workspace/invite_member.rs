//! InviteMemberHandler - Command handler for adding a user to a workspace roster.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::foundation::{Principal, UserId, WorkspaceId};
use crate::domain::workspace::{MembershipStatus, WorkspaceError, WorkspaceMember};
use crate::ports::WorkspaceRepository;

/// Command to add a membership row.
#[derive(Debug, Clone)]
pub struct InviteMemberCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: String,
    pub status: MembershipStatus,
}

/// Handler for inviting members.
///
/// Duplicate detection is a read followed by a write; two concurrent invites
/// for the same user can both succeed.
pub struct InviteMemberHandler {
    guard: AccessGuard,
    repository: Arc<dyn WorkspaceRepository>,
}

impl InviteMemberHandler {
    pub fn new(guard: AccessGuard, repository: Arc<dyn WorkspaceRepository>) -> Self {
        Self { guard, repository }
    }

    pub async fn handle(
        &self,
        cmd: InviteMemberCommand,
        principal: &Principal,
    ) -> Result<WorkspaceMember, WorkspaceError> {
        let user_id = UserId::new(cmd.user_id)?;

        self.guard
            .require_workspace(principal, cmd.workspace_id)
            .await?;

        if self.repository.find_by_id(cmd.workspace_id).await?.is_none() {
            return Err(WorkspaceError::not_found(cmd.workspace_id));
        }

        if self
            .repository
            .find_member_by_user(cmd.workspace_id, &user_id)
            .await?
            .is_some()
        {
            return Err(WorkspaceError::already_member(user_id));
        }

        let member = WorkspaceMember::new(cmd.workspace_id, user_id, cmd.status);
        self.repository.add_member(&member).await?;

        info!(
            workspace_id = %cmd.workspace_id,
            member_id = %member.id(),
            status = %member.status(),
            "Workspace member added"
        );
        Ok(member)
    }
}
