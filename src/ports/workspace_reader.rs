//! Workspace reader port (query side).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, MemberId, Page, PageRequest, Timestamp, UserId, WorkspaceId,
};
use crate::domain::workspace::{MembershipStatus, WorkspaceMember};

/// Columns workspace listings can sort on.
pub const WORKSPACE_SORT_COLUMNS: &[&str] = &["title", "created_at", "updated_at"];

/// Columns member listings can sort on.
pub const MEMBER_SORT_COLUMNS: &[&str] = &["user_id", "status", "created_at"];

/// Workspace row with its campaign and entry counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceView {
    pub id: WorkspaceId,
    pub key: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub is_publish: bool,
    pub total_campaign: u64,
    pub total_entry: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Membership row for roster display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub id: MemberId,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub status: MembershipStatus,
    pub status_label: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&WorkspaceMember> for MemberView {
    fn from(member: &WorkspaceMember) -> Self {
        Self {
            id: member.id(),
            workspace_id: member.workspace_id(),
            user_id: member.user_id().clone(),
            status: member.status(),
            status_label: member.status().label().to_string(),
            created_at: member.created_at(),
            updated_at: member.updated_at(),
        }
    }
}

/// Read-only workspace queries.
#[async_trait]
pub trait WorkspaceReader: Send + Sync {
    /// Workspaces visible to `member`, or every workspace when `None`.
    ///
    /// Search matches the title; default order is creation order.
    async fn list(
        &self,
        member: Option<&UserId>,
        request: &PageRequest,
    ) -> Result<Page<WorkspaceView>, DomainError>;

    async fn get(&self, id: WorkspaceId) -> Result<Option<WorkspaceView>, DomainError>;

    /// Live members of a workspace. Search matches the user id.
    async fn list_members(
        &self,
        workspace_id: WorkspaceId,
        request: &PageRequest,
    ) -> Result<Page<MemberView>, DomainError>;
}
