//! Membership lookups that back the authorization predicates.
//!
//! Both checks are plain existence reads. `Ok(false)` means "no qualifying
//! membership" and is never an error; `Err` is reserved for data-store
//! failures. The admin short-circuit lives above this port, so adapters are
//! only consulted for non-admin principals.

use async_trait::async_trait;

use crate::domain::foundation::{CampaignId, DomainError, UserId, WorkspaceId};

/// Port for membership-based access checks.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// True iff a live workspace has a live APPROVED/OWNER membership for the user.
    async fn has_workspace_access(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// True iff the live campaign belongs to the live workspace and the user
    /// holds an APPROVED/OWNER membership there.
    ///
    /// Implementations answer this with one correlated read.
    async fn has_campaign_access(
        &self,
        workspace_id: WorkspaceId,
        campaign_id: CampaignId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;
}
