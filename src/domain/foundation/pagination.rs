//! List query parameters and paginated results.
//!
//! Clients send a loose [`QueryParams`]; listings resolve it against their own
//! sortable-column whitelist into a [`PageRequest`] before any adapter sees it,
//! so no raw client text ever reaches an `ORDER BY` clause.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Page used when the client sends none.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client sends none.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Raw list parameters as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// `column:direction`, direction is `asc` or `desc`.
    pub order_by: Option<String>,
}

impl QueryParams {
    /// Parameters for a specific page with default everything else.
    pub fn paginated(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Adds a search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Adds an ordering clause.
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Normalizes the parameters against the columns a listing can sort on.
    pub fn resolve(&self, sortable: &[&'static str]) -> Result<PageRequest, ValidationError> {
        let page = match self.page {
            Some(p) if p > 0 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match self.limit {
            Some(l) if l > 0 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let sort = match self.order_by.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(SortOrder::parse(raw, sortable)?),
        };

        Ok(PageRequest {
            page,
            limit,
            search,
            sort,
        })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated ordering clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// Logical column name taken from the listing's whitelist.
    pub column: &'static str,
    pub direction: SortDirection,
}

impl SortOrder {
    fn parse(raw: &str, sortable: &[&'static str]) -> Result<Self, ValidationError> {
        let (column, direction) = match raw.split_once(':') {
            Some((c, d)) => (c.trim(), d.trim()),
            None => (raw, ""),
        };

        let column = sortable
            .iter()
            .copied()
            .find(|allowed| allowed.eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "order_by",
                    format!("cannot sort by '{}'", column),
                )
            })?;

        let direction = match direction.to_ascii_lowercase().as_str() {
            "" | "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(ValidationError::invalid_format(
                    "order_by",
                    format!("unknown direction '{}'", other),
                ))
            }
        };

        Ok(Self { column, direction })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction.as_sql())
    }
}

/// Normalized list request handed to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    /// Trimmed, non-empty search term.
    pub search: Option<String>,
    /// `None` means natural order for the listing.
    pub sort: Option<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort: None,
        }
    }
}

impl PageRequest {
    /// Rows to skip: `limit * (page - 1)`.
    pub fn offset(&self) -> u32 {
        self.limit.saturating_mul(self.page.saturating_sub(1))
    }

    /// `%term%` pattern for a case-insensitive SQL `LIKE ... ESCAPE '\'`.
    ///
    /// `%`, `_` and `\` in the term match literally.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let mut pattern = String::with_capacity(s.len() + 2);
            pattern.push('%');
            for c in s.to_lowercase().chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }

    /// True when `haystack` contains the search term, ignoring case.
    ///
    /// Always true without a search term.
    pub fn matches_search(&self, haystack: &str) -> bool {
        match &self.search {
            Some(term) => haystack.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_page: u32,
}

impl<T> Page<T> {
    /// Wraps one already-fetched page.
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            total_page: total_pages(total, request.limit),
        }
    }

    /// Cuts the requested page out of a fully materialized, already ordered list.
    pub fn from_all(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit as usize)
            .collect();
        Self::new(items, total, request)
    }

    /// Converts each item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_page: self.total_page,
        }
    }
}

/// `ceil(total / limit)`, or 1 when there is nothing to page through.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if total == 0 || limit == 0 {
        return 1;
    }
    let limit = limit as u64;
    let pages = (total + limit - 1) / limit;
    u32::try_from(pages).unwrap_or(u32::MAX)
}
