//! Reporting reader port.

use async_trait::async_trait;

use crate::domain::foundation::{CampaignId, DomainError, Timestamp, WorkspaceId};
use crate::domain::reporting::{DailyEntryCount, WorkspaceSummary};

/// Aggregate counts. Soft-deleted entries, campaigns and workspaces are never counted.
#[async_trait]
pub trait SummaryReader: Send + Sync {
    async fn count_entries_by_campaign(&self, campaign_id: CampaignId)
        -> Result<u64, DomainError>;

    async fn workspace_summary(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<WorkspaceSummary, DomainError>;

    /// Entries per UTC day since `since`, ascending; days without entries are absent.
    async fn daily_entries(
        &self,
        campaign_id: CampaignId,
        since: Timestamp,
    ) -> Result<Vec<DailyEntryCount>, DomainError>;
}
