//! Workspace membership roster.

use crate::domain::foundation::{MemberId, Timestamp, UserId, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership status, persisted as a fixed short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
    #[serde(rename = "S1")]
    Invited,
    #[serde(rename = "S2")]
    Requested,
    #[serde(rename = "S3")]
    Approved,
    #[serde(rename = "S4")]
    Rejected,
    #[serde(rename = "S5")]
    Owner,
}

impl MembershipStatus {
    /// Statuses that confer workspace access.
    pub const GRANTING: [MembershipStatus; 2] = [MembershipStatus::Approved, MembershipStatus::Owner];

    /// Persisted short code.
    pub fn code(&self) -> &'static str {
        match self {
            MembershipStatus::Invited => "S1",
            MembershipStatus::Requested => "S2",
            MembershipStatus::Approved => "S3",
            MembershipStatus::Rejected => "S4",
            MembershipStatus::Owner => "S5",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MembershipStatus::Invited => "Invited",
            MembershipStatus::Requested => "Requested",
            MembershipStatus::Approved => "Approved",
            MembershipStatus::Rejected => "Rejected",
            MembershipStatus::Owner => "Owner",
        }
    }

    /// Only approved members and owners may act on the workspace.
    pub fn grants_access(&self) -> bool {
        matches!(self, MembershipStatus::Approved | MembershipStatus::Owner)
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S1" => Ok(MembershipStatus::Invited),
            "S2" => Ok(MembershipStatus::Requested),
            "S3" => Ok(MembershipStatus::Approved),
            "S4" => Ok(MembershipStatus::Rejected),
            "S5" => Ok(MembershipStatus::Owner),
            other => Err(format!("Unknown membership status: {}", other)),
        }
    }
}

/// One (workspace, user) membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    id: MemberId,
    workspace_id: WorkspaceId,
    user_id: UserId,
    status: MembershipStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl WorkspaceMember {
    /// New membership row with the given status.
    pub fn new(workspace_id: WorkspaceId, user_id: UserId, status: MembershipStatus) -> Self {
        let now = Timestamp::now();
        Self {
            id: MemberId::new(),
            workspace_id,
            user_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Owner membership for a workspace's creator.
    pub fn owner(workspace_id: WorkspaceId, user_id: UserId) -> Self {
        Self::new(workspace_id, user_id, MembershipStatus::Owner)
    }

    /// Reconstitute from persistence.
    pub fn reconstitute(
        id: MemberId,
        workspace_id: WorkspaceId,
        user_id: UserId,
        status: MembershipStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            workspace_id,
            user_id,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn change_status(&mut self, status: MembershipStatus) {
        self.status = status;
        self.updated_at = Timestamp::now();
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> MembershipStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn grants_access(&self) -> bool {
        self.status.grants_access()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MembershipStatus; 5] = [
        MembershipStatus::Invited,
        MembershipStatus::Requested,
        MembershipStatus::Approved,
        MembershipStatus::Rejected,
        MembershipStatus::Owner,
    ];

    #[test]
    fn codes_are_fixed() {
        let codes: Vec<_> = ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["S1", "S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn codes_parse_back() {
        for status in ALL {
            assert_eq!(status.code().parse::<MembershipStatus>().unwrap(), status);
        }
        assert!("S6".parse::<MembershipStatus>().is_err());
        assert!("approved".parse::<MembershipStatus>().is_err());
    }

    #[test]
    fn only_approved_and_owner_grant_access() {
        let granting: Vec<_> = ALL.into_iter().filter(|s| s.grants_access()).collect();
        assert_eq!(granting, MembershipStatus::GRANTING.to_vec());
    }

    #[test]
    fn status_serializes_as_short_code() {
        assert_eq!(
            serde_json::to_string(&MembershipStatus::Owner).unwrap(),
            "\"S5\""
        );
    }

    #[test]
    fn owner_membership_grants_access() {
        let m = WorkspaceMember::owner(WorkspaceId::new(), UserId::new("u1").unwrap());
        assert_eq!(m.status(), MembershipStatus::Owner);
        assert!(m.grants_access());
    }

    #[test]
    fn change_status_updates_status() {
        let mut m = WorkspaceMember::new(
            WorkspaceId::new(),
            UserId::new("u1").unwrap(),
            MembershipStatus::Invited,
        );
        assert!(!m.grants_access());
        m.change_status(MembershipStatus::Approved);
        assert!(m.grants_access());
    }
}
