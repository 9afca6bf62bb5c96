//! Form entry repository port (write side).

use async_trait::async_trait;

use crate::domain::form_entry::FormEntry;
use crate::domain::foundation::{CampaignId, DomainError, FormEntryId};

/// Persistence for submissions.
#[async_trait]
pub trait FormEntryRepository: Send + Sync {
    /// Insert the header and every detail row in one transaction.
    async fn submit(&self, entry: &FormEntry) -> Result<(), DomainError>;

    /// Mark an entry of the given campaign deleted.
    ///
    /// # Errors
    ///
    /// `FormEntryNotFound` if no live entry matches.
    async fn soft_delete(
        &self,
        campaign_id: CampaignId,
        id: FormEntryId,
    ) -> Result<(), DomainError>;
}
