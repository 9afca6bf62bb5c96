//! PostgreSQL implementation of SummaryReader.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::helpers::{db_error, to_count};
use crate::domain::foundation::{CampaignId, DomainError, Timestamp, WorkspaceId};
use crate::domain::reporting::{DailyEntryCount, WorkspaceSummary};
use crate::ports::SummaryReader;

/// PostgreSQL implementation of SummaryReader.
#[derive(Clone)]
pub struct PostgresSummaryReader {
    pool: PgPool,
}

impl PostgresSummaryReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryReader for PostgresSummaryReader {
    async fn count_entries_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<u64, DomainError> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM form_entries fe
            JOIN campaigns c ON c.id = fe.campaign_id
            JOIN workspaces w ON w.id = c.workspace_id
            WHERE fe.campaign_id = $1
              AND fe.deleted = FALSE AND c.deleted = FALSE AND w.deleted = FALSE
            "#,
        )
        .bind(campaign_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("count campaign entries"))?;

        Ok(to_count(total))
    }

    async fn workspace_summary(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<WorkspaceSummary, DomainError> {
        let (total_campaign, total_entry): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM campaigns c
                  JOIN workspaces w ON w.id = c.workspace_id
                  WHERE c.workspace_id = $1 AND c.deleted = FALSE AND w.deleted = FALSE),
                (SELECT COUNT(*) FROM form_entries fe
                  JOIN campaigns c ON c.id = fe.campaign_id
                  JOIN workspaces w ON w.id = c.workspace_id
                  WHERE c.workspace_id = $1
                    AND fe.deleted = FALSE AND c.deleted = FALSE AND w.deleted = FALSE)
            "#,
        )
        .bind(workspace_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("summarize workspace"))?;

        Ok(WorkspaceSummary {
            total_campaign: to_count(total_campaign),
            total_entry: to_count(total_entry),
        })
    }

    async fn daily_entries(
        &self,
        campaign_id: CampaignId,
        since: Timestamp,
    ) -> Result<Vec<DailyEntryCount>, DomainError> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT (fe.created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS total
            FROM form_entries fe
            JOIN campaigns c ON c.id = fe.campaign_id
            WHERE fe.campaign_id = $1
              AND fe.created_at >= $2
              AND fe.deleted = FALSE AND c.deleted = FALSE
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(campaign_id.as_uuid())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("count daily entries"))?;

        Ok(rows
            .into_iter()
            .map(|(date, total)| DailyEntryCount {
                date,
                total: to_count(total),
            })
            .collect())
    }
}
