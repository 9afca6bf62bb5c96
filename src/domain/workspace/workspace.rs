//! Workspace aggregate.
//!
//! A workspace is the tenant boundary: it owns campaigns and a membership
//! roster. Soft-deleted workspaces are never materialized by readers.

use crate::domain::foundation::{
    required_text, short_key, slugify, Timestamp, ValidationError, WorkspaceId,
};
use serde::{Deserialize, Serialize};

/// Maximum length for workspace title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Workspace aggregate.
///
/// # Invariants
///
/// - `key` is the first segment of `id` and never changes
/// - `slug` is always derived from the current `title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    key: String,
    title: String,
    slug: String,
    description: String,
    is_publish: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Workspace {
    /// Create a new workspace with a fresh id and derived key/slug.
    pub fn new(
        title: &str,
        description: impl Into<String>,
        is_publish: bool,
    ) -> Result<Self, ValidationError> {
        let title = required_text("title", title, MAX_TITLE_LENGTH)?;
        let id = WorkspaceId::new();
        let now = Timestamp::now();

        Ok(Self {
            key: short_key(id.as_uuid()),
            slug: slugify(&title),
            id,
            title,
            description: description.into(),
            is_publish,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a workspace from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: WorkspaceId,
        key: String,
        title: String,
        slug: String,
        description: String,
        is_publish: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            key,
            title,
            slug,
            description,
            is_publish,
            created_at,
            updated_at,
        }
    }

    /// Replace the editable details, re-deriving the slug.
    pub fn update_details(
        &mut self,
        title: &str,
        description: impl Into<String>,
        is_publish: bool,
    ) -> Result<(), ValidationError> {
        let title = required_text("title", title, MAX_TITLE_LENGTH)?;
        self.slug = slugify(&title);
        self.title = title;
        self.description = description.into();
        self.is_publish = is_publish;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> WorkspaceId {
        self.id
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

    #[test]
    fn new_workspace_derives_key_and_slug() {
        let ws = Workspace::new("Acme Marketing", "Team space", true).unwrap();
        assert_eq!(ws.key(), short_key(ws.id().as_uuid()));
        assert_eq!(ws.slug(), "acme-marketing");
        assert!(ws.is_publish());
    }

    #[test]
    fn new_workspace_rejects_blank_title() {
        assert!(matches!(
            Workspace::new("  ", "", false),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn update_details_rederives_slug_but_keeps_key() {
        let mut ws = Workspace::new("Old Name", "", false).unwrap();
        let key = ws.key().to_string();
        ws.update_details("New Name", "desc", true).unwrap();

        assert_eq!(ws.slug(), "new-name");
        assert_eq!(ws.key(), key);
        assert_eq!(ws.description(), "desc");
        assert!(!ws.updated_at().is_before(&ws.created_at()));
    }
}
