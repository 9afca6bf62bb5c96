//! PostgreSQL implementation of WorkspaceRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::helpers::{db_error, is_unique_violation, parse_member_status, parse_user_id};
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Timestamp, UserId, WorkspaceId,
};
use crate::domain::workspace::{Workspace, WorkspaceMember};
use crate::ports::WorkspaceRepository;

/// PostgreSQL implementation of the WorkspaceRepository port.
#[derive(Clone)]
pub struct PostgresWorkspaceRepository {
    pool: PgPool,
}

impl PostgresWorkspaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkspaceRow {
    id: Uuid,
    key: String,
    title: String,
    slug: String,
    description: String,
    is_publish: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(row: WorkspaceRow) -> Self {
        Workspace::reconstitute(
            WorkspaceId::from_uuid(row.id),
            row.key,
            row.title,
            row.slug,
            row.description,
            row.is_publish,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    workspace_id: Uuid,
    user_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for WorkspaceMember {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(WorkspaceMember::reconstitute(
            MemberId::from_uuid(row.id),
            WorkspaceId::from_uuid(row.workspace_id),
            parse_user_id(row.user_id)?,
            parse_member_status(&row.status)?,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const MEMBER_COLUMNS: &str = "id, workspace_id, user_id, status, created_at, updated_at";

fn not_found_if_untouched(rows: u64, code: ErrorCode, what: String) -> Result<(), DomainError> {
    if rows == 0 {
        return Err(DomainError::new(code, what));
    }
    Ok(())
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn create_with_owner(
        &self,
        workspace: &Workspace,
        owner: &WorkspaceMember,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO workspaces (id, key, title, slug, description, is_publish, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(workspace.id().as_uuid())
        .bind(workspace.key())
        .bind(workspace.title())
        .bind(workspace.slug())
        .bind(workspace.description())
        .bind(workspace.is_publish())
        .bind(workspace.created_at().as_datetime())
        .bind(workspace.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "workspaces_key_key") {
                return DomainError::new(
                    ErrorCode::DuplicateKey,
                    format!("Workspace key already taken: {}", workspace.key()),
                );
            }
            db_error("insert workspace")(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO workspace_users (id, workspace_id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(owner.id().as_uuid())
        .bind(owner.workspace_id().as_uuid())
        .bind(owner.user_id().as_str())
        .bind(owner.status().code())
        .bind(owner.created_at().as_datetime())
        .bind(owner.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert owner membership"))?;

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn update(&self, workspace: &Workspace) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE workspaces SET
                title = $2,
                slug = $3,
                description = $4,
                is_publish = $5,
                updated_at = $6
            WHERE id = $1 AND deleted = FALSE
            "#,
        )
        .bind(workspace.id().as_uuid())
        .bind(workspace.title())
        .bind(workspace.slug())
        .bind(workspace.description())
        .bind(workspace.is_publish())
        .bind(workspace.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update workspace"))?;

        not_found_if_untouched(
            result.rows_affected(),
            ErrorCode::WorkspaceNotFound,
            format!("Workspace not found: {}", workspace.id()),
        )
    }

    async fn soft_delete(&self, id: WorkspaceId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE workspaces SET deleted = TRUE, updated_at = NOW() WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(db_error("delete workspace"))?;

        not_found_if_untouched(
            result.rows_affected(),
            ErrorCode::WorkspaceNotFound,
            format!("Workspace not found: {}", id),
        )
    }

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, DomainError> {
        let row: Option<WorkspaceRow> = sqlx::query_as(
            r#"
            SELECT id, key, title, slug, description, is_publish, created_at, updated_at
            FROM workspaces
            WHERE id = $1 AND deleted = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch workspace"))?;

        Ok(row.map(Workspace::from))
    }

    async fn add_member(&self, member: &WorkspaceMember) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO workspace_users (id, workspace_id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(member.id().as_uuid())
        .bind(member.workspace_id().as_uuid())
        .bind(member.user_id().as_str())
        .bind(member.status().code())
        .bind(member.created_at().as_datetime())
        .bind(member.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert membership"))?;

        Ok(())
    }

    async fn update_member(&self, member: &WorkspaceMember) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE workspace_users SET status = $2, updated_at = $3 WHERE id = $1 AND deleted = FALSE",
        )
        .bind(member.id().as_uuid())
        .bind(member.status().code())
        .bind(member.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update membership"))?;

        not_found_if_untouched(
            result.rows_affected(),
            ErrorCode::MemberNotFound,
            format!("Member not found: {}", member.id()),
        )
    }

    async fn soft_delete_member(&self, id: MemberId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE workspace_users SET deleted = TRUE, updated_at = NOW() WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(db_error("delete membership"))?;

        not_found_if_untouched(
            result.rows_affected(),
            ErrorCode::MemberNotFound,
            format!("Member not found: {}", id),
        )
    }

    async fn find_member(
        &self,
        workspace_id: WorkspaceId,
        id: MemberId,
    ) -> Result<Option<WorkspaceMember>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM workspace_users WHERE id = $1 AND workspace_id = $2 AND deleted = FALSE",
            MEMBER_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(workspace_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch membership"))?;

        row.map(WorkspaceMember::try_from).transpose()
    }

    async fn find_member_by_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<WorkspaceMember>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM workspace_users WHERE workspace_id = $1 AND user_id = $2 AND deleted = FALSE LIMIT 1",
            MEMBER_COLUMNS
        ))
        .bind(workspace_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch membership"))?;

        row.map(WorkspaceMember::try_from).transpose()
    }
}
