//! PostgreSQL implementation of FormEntryRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::helpers::db_error;
use crate::domain::form_entry::FormEntry;
use crate::domain::foundation::{CampaignId, DomainError, ErrorCode, FormEntryId};
use crate::ports::FormEntryRepository;

/// PostgreSQL implementation of the FormEntryRepository port.
#[derive(Clone)]
pub struct PostgresFormEntryRepository {
    pool: PgPool,
}

impl PostgresFormEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormEntryRepository for PostgresFormEntryRepository {
    async fn submit(&self, entry: &FormEntry) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO form_entries (id, campaign_id, user_id, product_id, status, remark, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.campaign_id().as_uuid())
        .bind(entry.user_id().map(|u| u.as_str()))
        .bind(entry.product_id().map(|p| *p.as_uuid()))
        .bind(entry.status().code())
        .bind(entry.remark())
        .bind(entry.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert form entry"))?;

        for detail in entry.details() {
            sqlx::query(
                r#"
                INSERT INTO form_detail_entries (
                    id, form_entry_id, campaign_form_id, campaign_form_attribute_id, value,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $6)
                "#,
            )
            .bind(detail.id.as_uuid())
            .bind(detail.form_entry_id.as_uuid())
            .bind(detail.campaign_form_id.as_uuid())
            .bind(detail.campaign_form_attribute_id.map(|a| *a.as_uuid()))
            .bind(&detail.value)
            .bind(detail.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(db_error("insert form detail entry"))?;
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn soft_delete(
        &self,
        campaign_id: CampaignId,
        id: FormEntryId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE form_entries SET deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND campaign_id = $2 AND deleted = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(campaign_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(db_error("delete form entry"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::FormEntryNotFound,
                format!("Form entry not found: {}", id),
            ));
        }
        Ok(())
    }
}
