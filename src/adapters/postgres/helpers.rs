//! Shared helpers for the PostgreSQL adapters.

use crate::domain::form_entry::EntryStatus;
use crate::domain::foundation::{DomainError, ErrorCode, PageRequest, SortOrder, UserId};
use crate::domain::workspace::MembershipStatus;

/// Maps a driver error into a `DatabaseError` naming the failed action.
pub(super) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "Failed to {}", action);
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
    }
}

/// True when `e` violates the named unique constraint.
pub(super) fn is_unique_violation(e: &sqlx::Error, constraint: &str) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

/// `ORDER BY` clause for a listing.
///
/// `columns` maps each whitelisted logical column to its SQL expression, so
/// client text never reaches the query.
pub(super) fn order_clause(
    sort: Option<&SortOrder>,
    columns: &[(&str, &str)],
    natural: &str,
) -> String {
    let chosen = sort.and_then(|order| {
        columns
            .iter()
            .find(|(logical, _)| *logical == order.column)
            .map(|(_, expr)| format!("{} {}", expr, order.direction.as_sql()))
    });
    match chosen {
        Some(clause) => format!("ORDER BY {}, {}", clause, natural),
        None => format!("ORDER BY {}", natural),
    }
}

/// `(limit, offset)` as bind values.
pub(super) fn limit_offset(request: &PageRequest) -> (i64, i64) {
    (i64::from(request.limit), i64::from(request.offset()))
}

pub(super) fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

pub(super) fn parse_member_status(s: &str) -> Result<MembershipStatus, DomainError> {
    s.parse().map_err(|e: String| DomainError::new(ErrorCode::DatabaseError, e))
}

pub(super) fn parse_entry_status(s: &str) -> Result<EntryStatus, DomainError> {
    s.parse().map_err(|e: String| DomainError::new(ErrorCode::DatabaseError, e))
}

pub(super) fn parse_user_id(s: String) -> Result<UserId, DomainError> {
    UserId::new(s).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
    })
}
