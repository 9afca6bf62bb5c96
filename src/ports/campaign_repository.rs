//! Campaign repository port (write side).
//!
//! The campaign header and its form schema change only in whole units:
//! [`CampaignRepository::create`] and [`CampaignRepository::apply`] must each
//! commit everything or nothing.

use async_trait::async_trait;

use crate::domain::campaign::{Campaign, FieldDefinition, NewCampaign, ReconciliationPlan};
use crate::domain::foundation::{CampaignId, DomainError, WorkspaceId};

/// Persistence for campaigns and their form schema.
///
/// Every read ignores soft-deleted rows, including campaigns whose
/// workspace is deleted.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Insert header, fields and options atomically.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` when the generated short key is already taken.
    async fn create(&self, draft: &NewCampaign) -> Result<(), DomainError>;

    /// Apply a reconciliation plan atomically.
    ///
    /// # Errors
    ///
    /// `CampaignNotFound` if the campaign vanished since it was loaded.
    async fn apply(&self, plan: &ReconciliationPlan) -> Result<(), DomainError>;

    /// Mark a campaign deleted. Fields, options and entries are left untouched.
    async fn soft_delete(&self, id: CampaignId) -> Result<(), DomainError>;

    /// A live campaign, wherever it lives.
    async fn find(&self, id: CampaignId) -> Result<Option<Campaign>, DomainError>;

    /// A live campaign, only if it belongs to `workspace_id`.
    async fn find_in_workspace(
        &self,
        workspace_id: WorkspaceId,
        id: CampaignId,
    ) -> Result<Option<Campaign>, DomainError>;

    /// Lookup by public short key, optionally constrained on the publish flag.
    async fn find_by_key(
        &self,
        key: &str,
        is_publish: Option<bool>,
    ) -> Result<Option<Campaign>, DomainError>;

    /// Live fields with their live options, in display order.
    async fn load_schema(&self, id: CampaignId) -> Result<Vec<FieldDefinition>, DomainError>;
}
