//! PostgreSQL implementation of AccessChecker.
//!
//! Both checks are single `EXISTS` reads; the campaign check correlates
//! campaign, workspace and membership in one statement.

use async_trait::async_trait;
use sqlx::PgPool;

use super::helpers::db_error;
use crate::domain::foundation::{CampaignId, DomainError, UserId, WorkspaceId};
use crate::ports::AccessChecker;

/// PostgreSQL implementation of the AccessChecker port.
#[derive(Clone)]
pub struct PostgresAccessChecker {
    pool: PgPool,
}

impl PostgresAccessChecker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessChecker for PostgresAccessChecker {
    async fn has_workspace_access(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let (allowed,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM workspaces w
                JOIN workspace_users wu ON wu.workspace_id = w.id
                WHERE w.id = $1
                  AND w.deleted = FALSE
                  AND wu.user_id = $2
                  AND wu.deleted = FALSE
                  AND wu.status IN ('S3', 'S5')
            )
            "#,
        )
        .bind(workspace_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("check workspace access"))?;

        Ok(allowed)
    }

    async fn has_campaign_access(
        &self,
        workspace_id: WorkspaceId,
        campaign_id: CampaignId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let (allowed,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM campaigns c
                JOIN workspaces w ON w.id = c.workspace_id
                JOIN workspace_users wu ON wu.workspace_id = w.id
                WHERE c.id = $1
                  AND c.workspace_id = $2
                  AND c.deleted = FALSE
                  AND w.deleted = FALSE
                  AND wu.user_id = $3
                  AND wu.deleted = FALSE
                  AND wu.status IN ('S3', 'S5')
            )
            "#,
        )
        .bind(campaign_id.as_uuid())
        .bind(workspace_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("check campaign access"))?;

        Ok(allowed)
    }
}
