//! Form entry reader port (query side).
//!
//! Detail rows are enriched with the answered field's *current* title and
//! description at read time. A field deleted after submission still
//! resolves, so old entries keep rendering.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::form_entry::EntryStatus;
use crate::domain::foundation::{
    CampaignFormAttributeId, CampaignFormId, CampaignId, DomainError, FormDetailEntryId,
    FormEntryId, Page, PageRequest, ProductId, Timestamp, UserId,
};

/// Columns a submitter's history can sort on.
pub const HISTORY_SORT_COLUMNS: &[&str] = &["created_at", "campaign_title"];

/// Columns a campaign's entry listing can sort on.
pub const ENTRY_SORT_COLUMNS: &[&str] = &["created_at", "user_id"];

/// Submission header with its campaign's public names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub id: FormEntryId,
    pub campaign_id: CampaignId,
    pub campaign_key: String,
    pub campaign_title: String,
    pub user_id: Option<UserId>,
    pub product_id: Option<ProductId>,
    pub status: EntryStatus,
    pub status_label: String,
    pub remark: String,
    pub created_at: Timestamp,
}

/// One answered field, enriched with the field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailView {
    pub id: FormDetailEntryId,
    pub campaign_form_id: CampaignFormId,
    pub campaign_form_attribute_id: Option<CampaignFormAttributeId>,
    pub field_title: String,
    pub field_description: String,
    pub form_code: String,
    pub form_name: String,
    pub value: String,
    pub created_at: Timestamp,
}

/// Header plus ordered detail rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub entry: EntryView,
    pub details: Vec<DetailView>,
}

/// Read-only submission queries. Soft-deleted entries never appear.
#[async_trait]
pub trait FormEntryReader: Send + Sync {
    /// A submitter's own entries, newest first unless sorted otherwise.
    /// Search matches the campaign title.
    async fn history(
        &self,
        user_id: &UserId,
        request: &PageRequest,
    ) -> Result<Page<EntryView>, DomainError>;

    /// One of the submitter's own entries with details.
    async fn find_for_user(
        &self,
        user_id: &UserId,
        id: FormEntryId,
    ) -> Result<Option<EntryDetail>, DomainError>;

    /// Entries of one campaign, oldest first unless sorted otherwise.
    /// Search matches the submitter id.
    async fn list_by_campaign(
        &self,
        campaign_id: CampaignId,
        request: &PageRequest,
    ) -> Result<Page<EntryView>, DomainError>;

    /// One entry of a campaign with details.
    async fn find_in_campaign(
        &self,
        campaign_id: CampaignId,
        id: FormEntryId,
    ) -> Result<Option<EntryDetail>, DomainError>;
}
