//! PostgreSQL implementation of CampaignRepository.
//!
//! Create and reconciliation each run in one transaction; dropping the
//! transaction on any error rolls every statement back.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::helpers::{db_error, is_unique_violation};
use crate::domain::campaign::{
    AttributeChange, Campaign, CampaignForm, CampaignFormAttribute, Change, FieldChange,
    FieldDefinition, NewCampaign, ReconciliationPlan,
};
use crate::domain::foundation::{
    CampaignFormAttributeId, CampaignFormId, CampaignId, DomainError, ErrorCode, FormTypeId,
    Timestamp, WorkspaceId,
};
use crate::ports::CampaignRepository;

/// PostgreSQL implementation of the CampaignRepository port.
#[derive(Clone)]
pub struct PostgresCampaignRepository {
    pool: PgPool,
}

impl PostgresCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
pub(super) struct CampaignRow {
    id: Uuid,
    workspace_id: Uuid,
    key: String,
    title: String,
    slug: String,
    description: String,
    thumbnail: String,
    is_publish: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Campaign::reconstitute(
            CampaignId::from_uuid(row.id),
            WorkspaceId::from_uuid(row.workspace_id),
            row.key,
            row.title,
            row.slug,
            row.description,
            row.thumbnail,
            row.is_publish,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct FormRow {
    id: Uuid,
    campaign_id: Uuid,
    form_id: Uuid,
    title: String,
    description: String,
    placeholder: String,
    default_value: String,
    is_required: bool,
    is_multiple: bool,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FormRow> for CampaignForm {
    fn from(row: FormRow) -> Self {
        CampaignForm {
            id: CampaignFormId::from_uuid(row.id),
            campaign_id: CampaignId::from_uuid(row.campaign_id),
            form_type_id: FormTypeId::from_uuid(row.form_id),
            title: row.title,
            description: row.description,
            placeholder: row.placeholder,
            default_value: row.default_value,
            is_required: row.is_required,
            is_multiple: row.is_multiple,
            position: row.position,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct AttributeRow {
    id: Uuid,
    campaign_form_id: Uuid,
    label: String,
    value: String,
    is_default: bool,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AttributeRow> for CampaignFormAttribute {
    fn from(row: AttributeRow) -> Self {
        CampaignFormAttribute {
            id: CampaignFormAttributeId::from_uuid(row.id),
            campaign_form_id: CampaignFormId::from_uuid(row.campaign_form_id),
            label: row.label,
            value: row.value,
            is_default: row.is_default,
            position: row.position,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

pub(super) const CAMPAIGN_COLUMNS: &str = "c.id, c.workspace_id, c.key, c.title, c.slug, \
     c.description, c.thumbnail, c.is_publish, c.created_at, c.updated_at";

pub(super) const FORM_COLUMNS: &str = "cf.id, cf.campaign_id, cf.form_id, cf.title, \
     cf.description, cf.placeholder, cf.default_value, cf.is_required, cf.is_multiple, \
     cf.position, cf.created_at, cf.updated_at";

pub(super) const ATTRIBUTE_COLUMNS: &str = "a.id, a.campaign_form_id, a.label, a.value, \
     a.is_default, a.position, a.created_at, a.updated_at";

/// Live fields of a campaign in display order, with their live options.
pub(super) async fn fetch_schema(
    pool: &PgPool,
    campaign_id: CampaignId,
) -> Result<Vec<FieldDefinition>, DomainError> {
    let forms: Vec<FormRow> = sqlx::query_as(&format!(
        "SELECT {} FROM campaign_forms cf \
         WHERE cf.campaign_id = $1 AND cf.deleted = FALSE \
         ORDER BY cf.position ASC, cf.created_at ASC",
        FORM_COLUMNS
    ))
    .bind(campaign_id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(db_error("load campaign forms"))?;

    let form_ids: Vec<Uuid> = forms.iter().map(|f| f.id).collect();
    let attributes: Vec<AttributeRow> = sqlx::query_as(&format!(
        "SELECT {} FROM campaign_form_attributes a \
         WHERE a.campaign_form_id = ANY($1) AND a.deleted = FALSE \
         ORDER BY a.position ASC, a.created_at ASC",
        ATTRIBUTE_COLUMNS
    ))
    .bind(&form_ids)
    .fetch_all(pool)
    .await
    .map_err(db_error("load campaign form attributes"))?;

    let mut by_form: HashMap<Uuid, Vec<CampaignFormAttribute>> = HashMap::new();
    for row in attributes {
        by_form
            .entry(row.campaign_form_id)
            .or_default()
            .push(CampaignFormAttribute::from(row));
    }

    Ok(forms
        .into_iter()
        .map(|row| FieldDefinition {
            attributes: by_form.remove(&row.id).unwrap_or_default(),
            form: CampaignForm::from(row),
        })
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════
// Statements
// ════════════════════════════════════════════════════════════════════════════

async fn insert_form(
    tx: &mut Transaction<'_, Postgres>,
    form: &CampaignForm,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO campaign_forms (
            id, campaign_id, form_id, title, description, placeholder, default_value,
            is_required, is_multiple, position, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(form.id.as_uuid())
    .bind(form.campaign_id.as_uuid())
    .bind(form.form_type_id.as_uuid())
    .bind(&form.title)
    .bind(&form.description)
    .bind(&form.placeholder)
    .bind(&form.default_value)
    .bind(form.is_required)
    .bind(form.is_multiple)
    .bind(form.position)
    .bind(form.created_at.as_datetime())
    .bind(form.updated_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(db_error("insert campaign form"))?;
    Ok(())
}

async fn insert_attribute(
    tx: &mut Transaction<'_, Postgres>,
    attr: &CampaignFormAttribute,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO campaign_form_attributes (
            id, campaign_form_id, label, value, is_default, position, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(attr.id.as_uuid())
    .bind(attr.campaign_form_id.as_uuid())
    .bind(&attr.label)
    .bind(&attr.value)
    .bind(attr.is_default)
    .bind(attr.position)
    .bind(attr.created_at.as_datetime())
    .bind(attr.updated_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(db_error("insert campaign form attribute"))?;
    Ok(())
}

async fn apply_field(
    tx: &mut Transaction<'_, Postgres>,
    campaign_id: CampaignId,
    change: &FieldChange,
) -> Result<(), DomainError> {
    let (result, id) = match change {
        Change::Create(form) => return insert_form(tx, form).await,
        Change::Update(form) => {
            let result = sqlx::query(
                r#"
                UPDATE campaign_forms SET
                    form_id = $3, title = $4, description = $5, placeholder = $6,
                    default_value = $7, is_required = $8, is_multiple = $9,
                    position = $10, updated_at = $11
                WHERE id = $1 AND campaign_id = $2 AND deleted = FALSE
                "#,
            )
            .bind(form.id.as_uuid())
            .bind(campaign_id.as_uuid())
            .bind(form.form_type_id.as_uuid())
            .bind(&form.title)
            .bind(&form.description)
            .bind(&form.placeholder)
            .bind(&form.default_value)
            .bind(form.is_required)
            .bind(form.is_multiple)
            .bind(form.position)
            .bind(form.updated_at.as_datetime())
            .execute(&mut **tx)
            .await
            .map_err(db_error("update campaign form"))?;
            (result, form.id)
        }
        Change::SoftDelete(id) => {
            let result = sqlx::query(
                r#"
                UPDATE campaign_forms SET deleted = TRUE, updated_at = NOW()
                WHERE id = $1 AND campaign_id = $2 AND deleted = FALSE
                "#,
            )
            .bind(id.as_uuid())
            .bind(campaign_id.as_uuid())
            .execute(&mut **tx)
            .await
            .map_err(db_error("delete campaign form"))?;
            (result, *id)
        }
    };

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::CampaignFormNotFound,
            format!("Campaign form not found: {}", id),
        ));
    }
    Ok(())
}

async fn apply_attribute(
    tx: &mut Transaction<'_, Postgres>,
    change: &AttributeChange,
) -> Result<(), DomainError> {
    match change {
        Change::Create(attr) => insert_attribute(tx, attr).await,
        Change::Update(attr) => {
            sqlx::query(
                r#"
                UPDATE campaign_form_attributes SET
                    label = $2, value = $3, is_default = $4, position = $5, updated_at = $6
                WHERE id = $1 AND deleted = FALSE
                "#,
            )
            .bind(attr.id.as_uuid())
            .bind(&attr.label)
            .bind(&attr.value)
            .bind(attr.is_default)
            .bind(attr.position)
            .bind(attr.updated_at.as_datetime())
            .execute(&mut **tx)
            .await
            .map_err(db_error("update campaign form attribute"))?;
            Ok(())
        }
        Change::SoftDelete(id) => {
            sqlx::query(
                "UPDATE campaign_form_attributes SET deleted = TRUE, updated_at = NOW() \
                 WHERE id = $1 AND deleted = FALSE",
            )
            .bind(id.as_uuid())
            .execute(&mut **tx)
            .await
            .map_err(db_error("delete campaign form attribute"))?;
            Ok(())
        }
    }
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    async fn create(&self, draft: &NewCampaign) -> Result<(), DomainError> {
        let campaign = &draft.campaign;
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, workspace_id, key, title, slug, description, thumbnail, is_publish,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(campaign.id().as_uuid())
        .bind(campaign.workspace_id().as_uuid())
        .bind(campaign.key())
        .bind(campaign.title())
        .bind(campaign.slug())
        .bind(campaign.description())
        .bind(campaign.thumbnail())
        .bind(campaign.is_publish())
        .bind(campaign.created_at().as_datetime())
        .bind(campaign.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "campaigns_key_key") {
                return DomainError::new(
                    ErrorCode::DuplicateKey,
                    format!("Campaign key already taken: {}", campaign.key()),
                );
            }
            db_error("insert campaign")(e)
        })?;

        for field in &draft.fields {
            insert_form(&mut tx, &field.form).await?;
            for attr in &field.attributes {
                insert_attribute(&mut tx, attr).await?;
            }
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn apply(&self, plan: &ReconciliationPlan) -> Result<(), DomainError> {
        let campaign = &plan.campaign;
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE campaigns SET
                title = $2, slug = $3, description = $4, thumbnail = $5,
                is_publish = $6, updated_at = $7
            WHERE id = $1 AND deleted = FALSE
            "#,
        )
        .bind(campaign.id().as_uuid())
        .bind(campaign.title())
        .bind(campaign.slug())
        .bind(campaign.description())
        .bind(campaign.thumbnail())
        .bind(campaign.is_publish())
        .bind(campaign.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update campaign"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CampaignNotFound,
                format!("Campaign not found: {}", campaign.id()),
            ));
        }

        for change in &plan.fields {
            apply_field(&mut tx, campaign.id(), change).await?;
        }
        for change in &plan.attributes {
            apply_attribute(&mut tx, change).await?;
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn soft_delete(&self, id: CampaignId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE campaigns SET deleted = TRUE, updated_at = NOW() WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(db_error("delete campaign"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CampaignNotFound,
                format!("Campaign not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find(&self, id: CampaignId) -> Result<Option<Campaign>, DomainError> {
        let row: Option<CampaignRow> = sqlx::query_as(&format!(
            "SELECT {} FROM campaigns c JOIN workspaces w ON w.id = c.workspace_id \
             WHERE c.id = $1 AND c.deleted = FALSE AND w.deleted = FALSE",
            CAMPAIGN_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch campaign"))?;

        Ok(row.map(Campaign::from))
    }

    async fn find_in_workspace(
        &self,
        workspace_id: WorkspaceId,
        id: CampaignId,
    ) -> Result<Option<Campaign>, DomainError> {
        let row: Option<CampaignRow> = sqlx::query_as(&format!(
            "SELECT {} FROM campaigns c JOIN workspaces w ON w.id = c.workspace_id \
             WHERE c.id = $1 AND c.workspace_id = $2 AND c.deleted = FALSE AND w.deleted = FALSE",
            CAMPAIGN_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(workspace_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch campaign"))?;

        Ok(row.map(Campaign::from))
    }

    async fn find_by_key(
        &self,
        key: &str,
        is_publish: Option<bool>,
    ) -> Result<Option<Campaign>, DomainError> {
        let row: Option<CampaignRow> = sqlx::query_as(&format!(
            "SELECT {} FROM campaigns c JOIN workspaces w ON w.id = c.workspace_id \
             WHERE c.key = $1 AND ($2::boolean IS NULL OR c.is_publish = $2) \
               AND c.deleted = FALSE AND w.deleted = FALSE",
            CAMPAIGN_COLUMNS
        ))
        .bind(key)
        .bind(is_publish)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch campaign by key"))?;

        Ok(row.map(Campaign::from))
    }

    async fn load_schema(&self, id: CampaignId) -> Result<Vec<FieldDefinition>, DomainError> {
        fetch_schema(&self.pool, id).await
    }
}
