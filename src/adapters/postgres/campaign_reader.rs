//! PostgreSQL implementation of CampaignReader.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::campaign_repository::{fetch_schema, AttributeRow, ATTRIBUTE_COLUMNS};
use super::helpers::{db_error, limit_offset, order_clause, to_count};
use crate::domain::campaign::CampaignFormAttribute;
use crate::domain::foundation::{
    CampaignFormId, CampaignId, DomainError, Page, PageRequest, Timestamp,
    WorkspaceId,
};
use crate::ports::{CampaignFormView, CampaignReader, CampaignSummaryView};

/// PostgreSQL implementation of CampaignReader.
#[derive(Clone)]
pub struct PostgresCampaignReader {
    pool: PgPool,
}

impl PostgresCampaignReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CAMPAIGN_ORDER: &[(&str, &str)] = &[
    ("title", "LOWER(c.title)"),
    ("created_at", "c.created_at"),
    ("updated_at", "c.updated_at"),
];

const CAMPAIGN_FILTER: &str = r#"
    FROM campaigns c
    JOIN workspaces w ON w.id = c.workspace_id
    WHERE c.workspace_id = $1 AND c.deleted = FALSE AND w.deleted = FALSE
      AND ($2::text IS NULL OR LOWER(c.title) LIKE $2 ESCAPE '\')
"#;

fn row_to_summary(row: PgRow) -> Result<CampaignSummaryView, DomainError> {
    let get_err = db_error("read campaign row");
    Ok(CampaignSummaryView {
        id: CampaignId::from_uuid(row.try_get::<Uuid, _>("id").map_err(&get_err)?),
        workspace_id: WorkspaceId::from_uuid(
            row.try_get::<Uuid, _>("workspace_id").map_err(&get_err)?,
        ),
        key: row.try_get("key").map_err(&get_err)?,
        title: row.try_get("title").map_err(&get_err)?,
        slug: row.try_get("slug").map_err(&get_err)?,
        description: row.try_get("description").map_err(&get_err)?,
        thumbnail: row.try_get("thumbnail").map_err(&get_err)?,
        is_publish: row.try_get("is_publish").map_err(&get_err)?,
        total_entry: to_count(row.try_get("total_entry").map_err(&get_err)?),
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(&get_err)?,
        ),
        updated_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("updated_at").map_err(&get_err)?,
        ),
    })
}

#[async_trait]
impl CampaignReader for PostgresCampaignReader {
    async fn list(
        &self,
        workspace_id: WorkspaceId,
        request: &PageRequest,
    ) -> Result<Page<CampaignSummaryView>, DomainError> {
        let pattern = request.search_pattern();
        let (limit, offset) = limit_offset(request);

        let sql = format!(
            r#"
            SELECT c.id, c.workspace_id, c.key, c.title, c.slug, c.description, c.thumbnail,
                   c.is_publish, c.created_at, c.updated_at,
                   (SELECT COUNT(*) FROM form_entries fe
                     WHERE fe.campaign_id = c.id AND fe.deleted = FALSE) AS total_entry
            {} {} LIMIT $3 OFFSET $4
            "#,
            CAMPAIGN_FILTER,
            order_clause(request.sort.as_ref(), CAMPAIGN_ORDER, "c.created_at ASC, c.id ASC"),
        );
        let rows = sqlx::query(&sql)
            .bind(workspace_id.as_uuid())
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list campaigns"))?;
        let items = rows
            .into_iter()
            .map(row_to_summary)
            .collect::<Result<Vec<_>, _>>()?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) {}", CAMPAIGN_FILTER))
            .bind(workspace_id.as_uuid())
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count campaigns"))?;

        Ok(Page::new(items, to_count(total), request))
    }

    async fn forms_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CampaignFormView>, DomainError> {
        let schema = fetch_schema(&self.pool, campaign_id).await?;

        let catalog: HashMap<Uuid, (String, String)> =
            sqlx::query_as::<_, (Uuid, String, String)>("SELECT id, code, name FROM forms")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("load form catalog"))?
                .into_iter()
                .map(|(id, code, name)| (id, (code, name)))
                .collect();

        Ok(schema
            .into_iter()
            .map(|def| {
                let form = def.form;
                let (form_code, form_name) = catalog
                    .get(form.form_type_id.as_uuid())
                    .cloned()
                    .unwrap_or_default();
                CampaignFormView {
                    id: form.id,
                    campaign_id: form.campaign_id,
                    form_type_id: form.form_type_id,
                    form_code,
                    form_name,
                    title: form.title,
                    description: form.description,
                    placeholder: form.placeholder,
                    default_value: form.default_value,
                    is_required: form.is_required,
                    is_multiple: form.is_multiple,
                    position: form.position,
                    attributes: def.attributes,
                    created_at: form.created_at,
                    updated_at: form.updated_at,
                }
            })
            .collect())
    }

    async fn form_attributes(
        &self,
        campaign_form_id: CampaignFormId,
    ) -> Result<Vec<CampaignFormAttribute>, DomainError> {
        let rows: Vec<AttributeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM campaign_form_attributes a \
             WHERE a.campaign_form_id = $1 AND a.deleted = FALSE \
             ORDER BY a.position ASC, a.created_at ASC",
            ATTRIBUTE_COLUMNS
        ))
        .bind(campaign_form_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list campaign form attributes"))?;

        Ok(rows.into_iter().map(CampaignFormAttribute::from).collect())
    }
}
