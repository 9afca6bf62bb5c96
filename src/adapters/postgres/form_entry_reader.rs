//! PostgreSQL implementation of FormEntryReader.
//!
//! Detail rows join the answered field without a `deleted` filter, so
//! entries keep rendering after their fields are removed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::helpers::{
    db_error, limit_offset, order_clause, parse_entry_status, parse_user_id, to_count,
};
use crate::domain::foundation::{
    CampaignFormAttributeId, CampaignFormId, CampaignId, DomainError, FormDetailEntryId,
    FormEntryId, Page, PageRequest, ProductId, Timestamp, UserId,
};
use crate::ports::{DetailView, EntryDetail, EntryView, FormEntryReader};

/// PostgreSQL implementation of FormEntryReader.
#[derive(Clone)]
pub struct PostgresFormEntryReader {
    pool: PgPool,
}

impl PostgresFormEntryReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ENTRY_ORDER: &[(&str, &str)] = &[
    ("created_at", "fe.created_at"),
    ("campaign_title", "LOWER(c.title)"),
    ("user_id", "fe.user_id"),
];

const ENTRY_SELECT: &str = r#"
    SELECT fe.id, fe.campaign_id, c.key AS campaign_key, c.title AS campaign_title,
           fe.user_id, fe.product_id, fe.status, fe.remark, fe.created_at
"#;

/// Submitter's own live entries; the campaign may since have been deleted.
const HISTORY_FILTER: &str = r#"
    FROM form_entries fe
    JOIN campaigns c ON c.id = fe.campaign_id
    WHERE fe.user_id = $1 AND fe.deleted = FALSE
      AND ($2::text IS NULL OR LOWER(c.title) LIKE $2 ESCAPE '\')
"#;

const CAMPAIGN_ENTRY_FILTER: &str = r#"
    FROM form_entries fe
    JOIN campaigns c ON c.id = fe.campaign_id
    WHERE fe.campaign_id = $1::uuid AND fe.deleted = FALSE
      AND ($2::text IS NULL OR LOWER(COALESCE(fe.user_id, '')) LIKE $2 ESCAPE '\')
"#;

fn row_to_entry_view(row: PgRow) -> Result<EntryView, DomainError> {
    let get_err = db_error("read form entry row");
    let status = parse_entry_status(&row.try_get::<String, _>("status").map_err(&get_err)?)?;
    let user_id = row
        .try_get::<Option<String>, _>("user_id")
        .map_err(&get_err)?
        .map(parse_user_id)
        .transpose()?;

    Ok(EntryView {
        id: FormEntryId::from_uuid(row.try_get::<Uuid, _>("id").map_err(&get_err)?),
        campaign_id: CampaignId::from_uuid(row.try_get::<Uuid, _>("campaign_id").map_err(&get_err)?),
        campaign_key: row.try_get("campaign_key").map_err(&get_err)?,
        campaign_title: row.try_get("campaign_title").map_err(&get_err)?,
        user_id,
        product_id: row
            .try_get::<Option<Uuid>, _>("product_id")
            .map_err(&get_err)?
            .map(ProductId::from_uuid),
        status,
        status_label: status.label().to_string(),
        remark: row.try_get("remark").map_err(&get_err)?,
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(&get_err)?,
        ),
    })
}

fn row_to_detail_view(row: PgRow) -> Result<DetailView, DomainError> {
    let get_err = db_error("read form detail row");
    Ok(DetailView {
        id: FormDetailEntryId::from_uuid(row.try_get::<Uuid, _>("id").map_err(&get_err)?),
        campaign_form_id: CampaignFormId::from_uuid(
            row.try_get::<Uuid, _>("campaign_form_id").map_err(&get_err)?,
        ),
        campaign_form_attribute_id: row
            .try_get::<Option<Uuid>, _>("campaign_form_attribute_id")
            .map_err(&get_err)?
            .map(CampaignFormAttributeId::from_uuid),
        field_title: row.try_get("field_title").map_err(&get_err)?,
        field_description: row.try_get("field_description").map_err(&get_err)?,
        form_code: row.try_get("form_code").map_err(&get_err)?,
        form_name: row.try_get("form_name").map_err(&get_err)?,
        value: row.try_get("value").map_err(&get_err)?,
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(&get_err)?,
        ),
    })
}

impl PostgresFormEntryReader {
    /// One page of entries; `key` binds as `$1` of `filter`.
    async fn page(
        &self,
        filter: &str,
        key: String,
        request: &PageRequest,
        natural: &str,
    ) -> Result<Page<EntryView>, DomainError> {
        let pattern = request.search_pattern();
        let (limit, offset) = limit_offset(request);

        let sql = format!(
            "{} {} {} LIMIT $3 OFFSET $4",
            ENTRY_SELECT,
            filter,
            order_clause(request.sort.as_ref(), ENTRY_ORDER, natural),
        );
        let rows = sqlx::query(&sql)
            .bind(&key)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list form entries"))?;
        let items = rows
            .into_iter()
            .map(row_to_entry_view)
            .collect::<Result<Vec<_>, _>>()?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) {}", filter))
            .bind(&key)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count form entries"))?;

        Ok(Page::new(items, to_count(total), request))
    }

    async fn details(&self, entry: EntryView) -> Result<EntryDetail, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT d.id, d.campaign_form_id, d.campaign_form_attribute_id, d.value, d.created_at,
                   COALESCE(cf.title, '') AS field_title,
                   COALESCE(cf.description, '') AS field_description,
                   COALESCE(f.code, '') AS form_code,
                   COALESCE(f.name, '') AS form_name
            FROM form_detail_entries d
            LEFT JOIN campaign_forms cf ON cf.id = d.campaign_form_id
            LEFT JOIN forms f ON f.id = cf.form_id
            WHERE d.form_entry_id = $1 AND d.deleted = FALSE
            ORDER BY cf.position ASC NULLS LAST, d.created_at ASC
            "#,
        )
        .bind(entry.id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load form detail entries"))?;

        let details = rows
            .into_iter()
            .map(row_to_detail_view)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntryDetail { entry, details })
    }
}

#[async_trait]
impl FormEntryReader for PostgresFormEntryReader {
    async fn history(
        &self,
        user_id: &UserId,
        request: &PageRequest,
    ) -> Result<Page<EntryView>, DomainError> {
        self.page(
            HISTORY_FILTER,
            user_id.as_str().to_string(),
            request,
            "fe.created_at DESC, fe.id DESC",
        )
        .await
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
        id: FormEntryId,
    ) -> Result<Option<EntryDetail>, DomainError> {
        let row = sqlx::query(&format!(
            "{} FROM form_entries fe JOIN campaigns c ON c.id = fe.campaign_id \
             WHERE fe.id = $1 AND fe.user_id = $2 AND fe.deleted = FALSE",
            ENTRY_SELECT
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch form entry"))?;

        match row {
            Some(row) => Ok(Some(self.details(row_to_entry_view(row)?).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_campaign(
        &self,
        campaign_id: CampaignId,
        request: &PageRequest,
    ) -> Result<Page<EntryView>, DomainError> {
        self.page(
            CAMPAIGN_ENTRY_FILTER,
            campaign_id.to_string(),
            request,
            "fe.created_at ASC, fe.id ASC",
        )
        .await
    }

    async fn find_in_campaign(
        &self,
        campaign_id: CampaignId,
        id: FormEntryId,
    ) -> Result<Option<EntryDetail>, DomainError> {
        let row = sqlx::query(&format!(
            "{} FROM form_entries fe JOIN campaigns c ON c.id = fe.campaign_id \
             WHERE fe.id = $1 AND fe.campaign_id = $2 AND fe.deleted = FALSE",
            ENTRY_SELECT
        ))
        .bind(id.as_uuid())
        .bind(campaign_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch form entry"))?;

        match row {
            Some(row) => Ok(Some(self.details(row_to_entry_view(row)?).await?)),
            None => Ok(None),
        }
    }
}
