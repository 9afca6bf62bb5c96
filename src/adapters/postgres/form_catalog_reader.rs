//! PostgreSQL implementation of FormCatalogReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::helpers::{db_error, limit_offset, order_clause, to_count};
use crate::domain::form_catalog::FormType;
use crate::domain::foundation::{DomainError, FormTypeId, Page, PageRequest, Timestamp};
use crate::ports::FormCatalogReader;

/// PostgreSQL implementation of FormCatalogReader.
#[derive(Clone)]
pub struct PostgresFormCatalogReader {
    pool: PgPool,
}

impl PostgresFormCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const FORM_TYPE_ORDER: &[(&str, &str)] = &[
    ("code", "f.code"),
    ("name", "LOWER(f.name)"),
    ("created_at", "f.created_at"),
];

#[derive(Debug, sqlx::FromRow)]
struct FormTypeRow {
    id: Uuid,
    code: String,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<FormTypeRow> for FormType {
    fn from(row: FormTypeRow) -> Self {
        FormType {
            id: FormTypeId::from_uuid(row.id),
            code: row.code,
            name: row.name,
            description: row.description,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const FORM_TYPE_SELECT: &str = "SELECT f.id, f.code, f.name, f.description, f.created_at FROM forms f";

#[async_trait]
impl FormCatalogReader for PostgresFormCatalogReader {
    async fn list(&self, request: &PageRequest) -> Result<Page<FormType>, DomainError> {
        const FILTER: &str = "WHERE f.deleted = FALSE AND ($1::text IS NULL OR LOWER(f.name) LIKE $1 ESCAPE '\\')";
        let pattern = request.search_pattern();
        let (limit, offset) = limit_offset(request);

        let rows: Vec<FormTypeRow> = sqlx::query_as(&format!(
            "{} {} {} LIMIT $2 OFFSET $3",
            FORM_TYPE_SELECT,
            FILTER,
            order_clause(request.sort.as_ref(), FORM_TYPE_ORDER, "f.id ASC"),
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list form types"))?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM forms f {}", FILTER))
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count form types"))?;

        Ok(Page::new(
            rows.into_iter().map(FormType::from).collect(),
            to_count(total),
            request,
        ))
    }

    async fn find(&self, id: FormTypeId) -> Result<Option<FormType>, DomainError> {
        let row: Option<FormTypeRow> = sqlx::query_as(&format!(
            "{} WHERE f.id = $1 AND f.deleted = FALSE",
            FORM_TYPE_SELECT
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch form type"))?;

        Ok(row.map(FormType::from))
    }

    async fn all(&self) -> Result<Vec<FormType>, DomainError> {
        let rows: Vec<FormTypeRow> = sqlx::query_as(&format!(
            "{} WHERE f.deleted = FALSE ORDER BY f.id ASC",
            FORM_TYPE_SELECT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load form catalog"))?;

        Ok(rows.into_iter().map(FormType::from).collect())
    }
}
