//! Workspace repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, UserId, WorkspaceId};
use crate::domain::workspace::{Workspace, WorkspaceMember};

/// Persistence for workspaces and their rosters.
///
/// Every read ignores soft-deleted rows.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Insert a workspace and its owner membership in one transaction.
    async fn create_with_owner(
        &self,
        workspace: &Workspace,
        owner: &WorkspaceMember,
    ) -> Result<(), DomainError>;

    /// Persist edited details.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound` if the workspace is absent or deleted.
    async fn update(&self, workspace: &Workspace) -> Result<(), DomainError>;

    /// Mark a workspace deleted. Campaigns and members are left untouched.
    async fn soft_delete(&self, id: WorkspaceId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, DomainError>;

    /// Insert a membership row. Duplicate detection happens in the caller.
    async fn add_member(&self, member: &WorkspaceMember) -> Result<(), DomainError>;

    /// Persist a membership status change.
    async fn update_member(&self, member: &WorkspaceMember) -> Result<(), DomainError>;

    async fn soft_delete_member(&self, id: MemberId) -> Result<(), DomainError>;

    async fn find_member(
        &self,
        workspace_id: WorkspaceId,
        id: MemberId,
    ) -> Result<Option<WorkspaceMember>, DomainError>;

    /// The live membership row for a user, whatever its status.
    async fn find_member_by_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<WorkspaceMember>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn WorkspaceRepository) {}
    }
}
