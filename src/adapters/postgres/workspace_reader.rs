//! PostgreSQL implementation of WorkspaceReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::helpers::{
    db_error, limit_offset, order_clause, parse_member_status, parse_user_id, to_count,
};
use crate::domain::foundation::{
    DomainError, MemberId, Page, PageRequest, Timestamp, UserId, WorkspaceId,
};
use crate::ports::{MemberView, WorkspaceReader, WorkspaceView};

/// PostgreSQL implementation of WorkspaceReader.
#[derive(Clone)]
pub struct PostgresWorkspaceReader {
    pool: PgPool,
}

impl PostgresWorkspaceReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const WORKSPACE_ORDER: &[(&str, &str)] = &[
    ("title", "LOWER(w.title)"),
    ("created_at", "w.created_at"),
    ("updated_at", "w.updated_at"),
];

const MEMBER_ORDER: &[(&str, &str)] = &[
    ("user_id", "wu.user_id"),
    ("status", "wu.status"),
    ("created_at", "wu.created_at"),
];

/// Workspace columns plus live campaign and entry counts.
const WORKSPACE_SELECT: &str = r#"
    SELECT w.id, w.key, w.title, w.slug, w.description, w.is_publish,
           w.created_at, w.updated_at,
           (SELECT COUNT(*) FROM campaigns c
             WHERE c.workspace_id = w.id AND c.deleted = FALSE) AS total_campaign,
           (SELECT COUNT(*) FROM form_entries fe
             JOIN campaigns c ON c.id = fe.campaign_id
             WHERE c.workspace_id = w.id AND c.deleted = FALSE AND fe.deleted = FALSE) AS total_entry
    FROM workspaces w
"#;

/// Live workspaces, optionally only those where `$1` holds an approved or owner membership.
const WORKSPACE_FILTER: &str = r#"
    WHERE w.deleted = FALSE
      AND ($1::text IS NULL OR EXISTS (
            SELECT 1 FROM workspace_users wu
            WHERE wu.workspace_id = w.id AND wu.user_id = $1
              AND wu.deleted = FALSE AND wu.status IN ('S3', 'S5')))
      AND ($2::text IS NULL OR LOWER(w.title) LIKE $2 ESCAPE '\')
"#;

fn row_to_workspace_view(row: PgRow) -> Result<WorkspaceView, DomainError> {
    let get_err = db_error("read workspace row");
    Ok(WorkspaceView {
        id: WorkspaceId::from_uuid(row.try_get::<Uuid, _>("id").map_err(&get_err)?),
        key: row.try_get("key").map_err(&get_err)?,
        title: row.try_get("title").map_err(&get_err)?,
        slug: row.try_get("slug").map_err(&get_err)?,
        description: row.try_get("description").map_err(&get_err)?,
        is_publish: row.try_get("is_publish").map_err(&get_err)?,
        total_campaign: to_count(row.try_get("total_campaign").map_err(&get_err)?),
        total_entry: to_count(row.try_get("total_entry").map_err(&get_err)?),
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(&get_err)?,
        ),
        updated_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("updated_at").map_err(&get_err)?,
        ),
    })
}

fn row_to_member_view(row: PgRow) -> Result<MemberView, DomainError> {
    let get_err = db_error("read membership row");
    let status = parse_member_status(&row.try_get::<String, _>("status").map_err(&get_err)?)?;
    Ok(MemberView {
        id: MemberId::from_uuid(row.try_get::<Uuid, _>("id").map_err(&get_err)?),
        workspace_id: WorkspaceId::from_uuid(
            row.try_get::<Uuid, _>("workspace_id").map_err(&get_err)?,
        ),
        user_id: parse_user_id(row.try_get("user_id").map_err(&get_err)?)?,
        status,
        status_label: status.label().to_string(),
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(&get_err)?,
        ),
        updated_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("updated_at").map_err(&get_err)?,
        ),
    })
}

#[async_trait]
impl WorkspaceReader for PostgresWorkspaceReader {
    async fn list(
        &self,
        member: Option<&UserId>,
        request: &PageRequest,
    ) -> Result<Page<WorkspaceView>, DomainError> {
        let member = member.map(UserId::as_str);
        let pattern = request.search_pattern();
        let (limit, offset) = limit_offset(request);

        let sql = format!(
            "{} {} {} LIMIT $3 OFFSET $4",
            WORKSPACE_SELECT,
            WORKSPACE_FILTER,
            order_clause(request.sort.as_ref(), WORKSPACE_ORDER, "w.created_at ASC, w.id ASC"),
        );
        let rows = sqlx::query(&sql)
            .bind(member)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list workspaces"))?;
        let items = rows
            .into_iter()
            .map(row_to_workspace_view)
            .collect::<Result<Vec<_>, _>>()?;

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM workspaces w {}", WORKSPACE_FILTER))
                .bind(member)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("count workspaces"))?;

        Ok(Page::new(items, to_count(total), request))
    }

    async fn get(&self, id: WorkspaceId) -> Result<Option<WorkspaceView>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE w.id = $1 AND w.deleted = FALSE", WORKSPACE_SELECT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch workspace"))?;

        row.map(row_to_workspace_view).transpose()
    }

    async fn list_members(
        &self,
        workspace_id: WorkspaceId,
        request: &PageRequest,
    ) -> Result<Page<MemberView>, DomainError> {
        const FILTER: &str = r#"
            FROM workspace_users wu
            WHERE wu.workspace_id = $1 AND wu.deleted = FALSE
              AND ($2::text IS NULL OR LOWER(wu.user_id) LIKE $2 ESCAPE '\')
        "#;
        let pattern = request.search_pattern();
        let (limit, offset) = limit_offset(request);

        let sql = format!(
            "SELECT wu.id, wu.workspace_id, wu.user_id, wu.status, wu.created_at, wu.updated_at {} {} LIMIT $3 OFFSET $4",
            FILTER,
            order_clause(request.sort.as_ref(), MEMBER_ORDER, "wu.created_at ASC, wu.id ASC"),
        );
        let rows = sqlx::query(&sql)
            .bind(workspace_id.as_uuid())
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list members"))?;
        let items = rows
            .into_iter()
            .map(row_to_member_view)
            .collect::<Result<Vec<_>, _>>()?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) {}", FILTER))
            .bind(workspace_id.as_uuid())
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count members"))?;

        Ok(Page::new(items, to_count(total), request))
    }
}
