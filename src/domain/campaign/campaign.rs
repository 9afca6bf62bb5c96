//! Campaign header entity.
//!
//! The header carries the public identity of a campaign (short key, slug,
//! thumbnail). Its form schema lives in [`super::schema`] and is only ever
//! changed together with the header through create or reconciliation.

use crate::domain::foundation::{
    initials, required_text, short_key, slugify, CampaignId, Timestamp, ValidationError,
    WorkspaceId,
};
use serde::{Deserialize, Serialize};

/// Maximum length for campaign title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Validated editable part of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignHeader {
    title: String,
    description: String,
    is_publish: bool,
}

impl CampaignHeader {
    pub fn new(
        title: &str,
        description: impl Into<String>,
        is_publish: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required_text("title", title, MAX_TITLE_LENGTH)?,
            description: description.into(),
            is_publish,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Campaign header.
///
/// # Invariants
///
/// - `key` is the first segment of `id`, set once at creation
/// - `slug` and `thumbnail` always follow the current `title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    id: CampaignId,
    workspace_id: WorkspaceId,
    key: String,
    title: String,
    slug: String,
    description: String,
    thumbnail: String,
    is_publish: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Campaign {
    /// Create a campaign with a fresh id; key, slug and thumbnail are derived.
    pub fn new(workspace_id: WorkspaceId, header: CampaignHeader) -> Self {
        let id = CampaignId::new();
        let now = Timestamp::now();
        Self {
            key: short_key(id.as_uuid()),
            slug: slugify(&header.title),
            thumbnail: initials(&header.title),
            id,
            workspace_id,
            title: header.title,
            description: header.description,
            is_publish: header.is_publish,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a campaign from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CampaignId,
        workspace_id: WorkspaceId,
        key: String,
        title: String,
        slug: String,
        description: String,
        thumbnail: String,
        is_publish: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            workspace_id,
            key,
            title,
            slug,
            description,
            thumbnail,
            is_publish,
            created_at,
            updated_at,
        }
    }

    /// Replace the header, re-deriving slug and thumbnail. The key is kept.
    pub fn apply_header(&mut self, header: CampaignHeader) {
        self.slug = slugify(&header.title);
        self.thumbnail = initials(&header.title);
        self.title = header.title;
        self.description = header.description;
        self.is_publish = header.is_publish;
        self.updated_at = Timestamp::now();
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CampaignId {
        self.id
    }

    pub fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn is_publish(&self) -> bool {
        self.is_publish
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(title: &str) -> CampaignHeader {
        CampaignHeader::new(title, "About it", true).unwrap()
    }

    #[test]
    fn new_campaign_derives_public_names() {
        let c = Campaign::new(WorkspaceId::new(), header("Customer Feedback Survey"));
        assert_eq!(c.key(), short_key(c.id().as_uuid()));
        assert_eq!(c.slug(), "customer-feedback-survey");
        assert_eq!(c.thumbnail(), "CFS");
        assert!(c.is_publish());
    }

    #[test]
    fn header_rejects_blank_title() {
        assert!(CampaignHeader::new("", "", false).is_err());
    }

    #[test]
    fn apply_header_keeps_key_and_rederives_names() {
        let mut c = Campaign::new(WorkspaceId::new(), header("First Title"));
        let key = c.key().to_string();
        c.apply_header(CampaignHeader::new("Second Go", "new", false).unwrap());

        assert_eq!(c.key(), key);
        assert_eq!(c.slug(), "second-go");
        assert_eq!(c.thumbnail(), "SG");
        assert_eq!(c.description(), "new");
        assert!(!c.is_publish());
    }
}
