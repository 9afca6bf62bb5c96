//! Campaign reader port (query side).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::campaign::{Campaign, CampaignFormAttribute};
use crate::domain::foundation::{
    CampaignFormId, CampaignId, DomainError, FormTypeId, Page, PageRequest, Timestamp,
    WorkspaceId,
};

/// Columns campaign listings can sort on.
pub const CAMPAIGN_SORT_COLUMNS: &[&str] = &["title", "created_at", "updated_at"];

/// Campaign row with its submission count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummaryView {
    pub id: CampaignId,
    pub workspace_id: WorkspaceId,
    pub key: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail: String,
    pub is_publish: bool,
    pub total_entry: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One field enriched with its catalog type and live options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFormView {
    pub id: CampaignFormId,
    pub campaign_id: CampaignId,
    pub form_type_id: FormTypeId,
    pub form_code: String,
    pub form_name: String,
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub default_value: String,
    pub is_required: bool,
    pub is_multiple: bool,
    pub position: i32,
    pub attributes: Vec<CampaignFormAttribute>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Campaign header plus its rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    pub forms: Vec<CampaignFormView>,
}

/// Read-only campaign queries. Soft-deleted rows never appear.
#[async_trait]
pub trait CampaignReader: Send + Sync {
    /// Campaigns of one workspace. Search matches the title.
    async fn list(
        &self,
        workspace_id: WorkspaceId,
        request: &PageRequest,
    ) -> Result<Page<CampaignSummaryView>, DomainError>;

    /// Live fields of a campaign in display order, each with its live options.
    async fn forms_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CampaignFormView>, DomainError>;

    /// Live options of one field in display order.
    async fn form_attributes(
        &self,
        campaign_form_id: CampaignFormId,
    ) -> Result<Vec<CampaignFormAttribute>, DomainError>;
}
