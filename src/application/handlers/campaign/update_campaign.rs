//! UpdateCampaignHandler - Command handler for the campaign reconciliation update.
//!
//! The incoming field list is the complete desired schema: fields and options
//! carrying an id are updated in place, those without one are created, and
//! stored ones the payload omits are soft-deleted. An empty list therefore
//! removes every field.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGuard;
use crate::domain::campaign::{
    check_form_types, parse_fields, reconcile, Campaign, CampaignError, CampaignHeader,
    FieldInput, PlanSummary,
};
use crate::domain::foundation::{CampaignId, ErrorCode, Principal, WorkspaceId};
use crate::ports::{CampaignRepository, FormCatalogReader};

/// Command to replace a campaign's header and schema.
#[derive(Debug, Clone)]
pub struct UpdateCampaignCommand {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
    pub title: String,
    pub description: String,
    pub is_publish: bool,
    pub fields: Vec<FieldInput>,
}

/// Result of a successful reconciliation.
#[derive(Debug, Clone)]
pub struct UpdateCampaignResult {
    pub campaign: Campaign,
    pub summary: PlanSummary,
}

/// Handler for updating campaigns.
///
/// Concurrent updates are last-writer-wins; there is no version check.
pub struct UpdateCampaignHandler {
    guard: AccessGuard,
    repository: Arc<dyn CampaignRepository>,
    catalog: Arc<dyn FormCatalogReader>,
}

impl UpdateCampaignHandler {
    pub fn new(
        guard: AccessGuard,
        repository: Arc<dyn CampaignRepository>,
        catalog: Arc<dyn FormCatalogReader>,
    ) -> Self {
        Self {
            guard,
            repository,
            catalog,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCampaignCommand,
        principal: &Principal,
    ) -> Result<UpdateCampaignResult, CampaignError> {
        // 1. Reject malformed payloads before touching any port
        let header = CampaignHeader::new(&cmd.title, cmd.description, cmd.is_publish)?;
        let specs = parse_fields(&cmd.fields)?;

        // 2. Authorize
        self.guard
            .require_campaign(principal, cmd.workspace_id, cmd.campaign_id)
            .await?;

        // 3. Load current state
        let mut campaign = self
            .repository
            .find_in_workspace(cmd.workspace_id, cmd.campaign_id)
            .await?
            .ok_or_else(|| CampaignError::not_found(cmd.campaign_id))?;
        check_form_types(&specs, &self.catalog.all().await?)?;
        let existing = self.repository.load_schema(cmd.campaign_id).await?;

        // 4. Plan and apply as one unit
        campaign.apply_header(header);
        let plan = reconcile::plan(campaign, &existing, &specs)?;
        let summary = plan.summary();

        self.repository
            .apply(&plan)
            .await
            .map_err(|err| match err.code {
                ErrorCode::CampaignNotFound => CampaignError::not_found(cmd.campaign_id),
                _ => err.into(),
            })?;

        info!(
            campaign_id = %cmd.campaign_id,
            fields_created = summary.fields_created,
            fields_updated = summary.fields_updated,
            fields_deleted = summary.fields_deleted,
            attributes_created = summary.attributes_created,
            attributes_updated = summary.attributes_updated,
            attributes_deleted = summary.attributes_deleted,
            "Campaign reconciled"
        );

        Ok(UpdateCampaignResult {
            campaign: plan.campaign,
            summary,
        })
    }
}
