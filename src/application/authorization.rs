//! AccessGuard - the workspace/campaign authorization predicate.
//!
//! Only one fact is trusted from the credential: whether the caller is a
//! global admin. Everyone else is checked against live membership rows on
//! every call.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, Principal, WorkspaceId,
};
use crate::ports::AccessChecker;

/// Authorization service shared by every scoped handler.
#[derive(Clone)]
pub struct AccessGuard {
    checker: Arc<dyn AccessChecker>,
}

impl AccessGuard {
    pub fn new(checker: Arc<dyn AccessChecker>) -> Self {
        Self { checker }
    }

    /// True for admins, otherwise true iff the caller holds an approved or
    /// owner membership in the workspace.
    ///
    /// A missing membership is `Ok(false)`; store failures propagate.
    pub async fn can_access_workspace(
        &self,
        principal: &Principal,
        workspace_id: WorkspaceId,
    ) -> Result<bool, DomainError> {
        if principal.is_admin() {
            return Ok(true);
        }
        self.checker
            .has_workspace_access(workspace_id, &principal.user_id)
            .await
    }

    /// Like [`Self::can_access_workspace`], additionally requiring the campaign
    /// to belong to that workspace.
    pub async fn can_access_campaign(
        &self,
        principal: &Principal,
        workspace_id: WorkspaceId,
        campaign_id: CampaignId,
    ) -> Result<bool, DomainError> {
        if principal.is_admin() {
            return Ok(true);
        }
        self.checker
            .has_campaign_access(workspace_id, campaign_id, &principal.user_id)
            .await
    }

    /// Fails with `Forbidden` unless [`Self::can_access_workspace`] holds.
    pub async fn require_workspace(
        &self,
        principal: &Principal,
        workspace_id: WorkspaceId,
    ) -> Result<(), DomainError> {
        if self.can_access_workspace(principal, workspace_id).await? {
            return Ok(());
        }
        warn!(
            user_id = %principal.user_id,
            workspace_id = %workspace_id,
            "Workspace access denied"
        );
        Err(forbidden())
    }

    /// Fails with `Forbidden` unless [`Self::can_access_campaign`] holds.
    pub async fn require_campaign(
        &self,
        principal: &Principal,
        workspace_id: WorkspaceId,
        campaign_id: CampaignId,
    ) -> Result<(), DomainError> {
        if self
            .can_access_campaign(principal, workspace_id, campaign_id)
            .await?
        {
            return Ok(());
        }
        warn!(
            user_id = %principal.user_id,
            workspace_id = %workspace_id,
            campaign_id = %campaign_id,
            "Campaign access denied"
        );
        Err(forbidden())
    }
}

fn forbidden() -> DomainError {
    DomainError::new(ErrorCode::Forbidden, "Permission denied")
}
