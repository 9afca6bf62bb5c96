//! CreateCampaignHandler - Command handler for creating a campaign with its form schema.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::KEY_ATTEMPTS;
use crate::application::AccessGuard;
use crate::domain::campaign::{
    check_form_types, parse_fields, Campaign, CampaignError, CampaignHeader, FieldInput,
    NewCampaign,
};
use crate::domain::foundation::{ErrorCode, Principal, WorkspaceId};
use crate::ports::{CampaignRepository, FormCatalogReader};

/// Command to create a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaignCommand {
    pub workspace_id: WorkspaceId,
    pub title: String,
    pub description: String,
    pub is_publish: bool,
    /// Ordered field list; ids are ignored on create.
    pub fields: Vec<FieldInput>,
}

/// Handler for creating campaigns.
///
/// The header, every field and every option are written as one unit. A key
/// collision retries with a fresh id.
pub struct CreateCampaignHandler {
    guard: AccessGuard,
    repository: Arc<dyn CampaignRepository>,
    catalog: Arc<dyn FormCatalogReader>,
}

impl CreateCampaignHandler {
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
        cmd: CreateCampaignCommand,
        principal: &Principal,
    ) -> Result<Campaign, CampaignError> {
        self.guard
            .require_workspace(principal, cmd.workspace_id)
            .await?;

        let header = CampaignHeader::new(&cmd.title, cmd.description, cmd.is_publish)?;
        let mut specs = parse_fields(&cmd.fields)?;
        // New campaigns have nothing to reconcile against.
        for spec in &mut specs {
            spec.id = None;
            for attr in &mut spec.attributes {
                attr.id = None;
            }
        }
        check_form_types(&specs, &self.catalog.all().await?)?;

        for attempt in 1..=KEY_ATTEMPTS {
            let draft = NewCampaign::build(Campaign::new(cmd.workspace_id, header.clone()), &specs);

            match self.repository.create(&draft).await {
                Ok(()) => {
                    info!(
                        campaign_id = %draft.campaign.id(),
                        workspace_id = %cmd.workspace_id,
                        key = draft.campaign.key(),
                        fields = draft.fields.len(),
                        attributes = draft.attribute_count(),
                        "Campaign created"
                    );
                    return Ok(draft.campaign);
                }
                Err(err) if err.code == ErrorCode::DuplicateKey => {
                    warn!(attempt, key = draft.campaign.key(), "Campaign key collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(CampaignError::conflict("could not allocate a unique campaign key"))
    }
}
