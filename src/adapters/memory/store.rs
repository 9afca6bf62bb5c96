//! Table storage, staged writes and failure injection.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Mutex, RwLock};

use crate::domain::campaign::{Campaign, CampaignForm, CampaignFormAttribute};
use crate::domain::form_catalog::FormType;
use crate::domain::form_entry::FormEntry;
use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, SortDirection, SortOrder, WorkspaceId,
};
use crate::domain::workspace::{Workspace, WorkspaceMember};

/// A stored row and its soft-delete flag.
#[derive(Debug, Clone)]
pub(super) struct Stored<T> {
    pub value: T,
    pub deleted: bool,
}

impl<T> Stored<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            deleted: false,
        }
    }
}

/// Every table, in insertion order.
#[derive(Debug, Clone, Default)]
pub(super) struct Tables {
    pub workspaces: Vec<Stored<Workspace>>,
    pub members: Vec<Stored<WorkspaceMember>>,
    pub campaigns: Vec<Stored<Campaign>>,
    pub forms: Vec<Stored<CampaignForm>>,
    pub attributes: Vec<Stored<CampaignFormAttribute>>,
    pub form_types: Vec<FormType>,
    pub entries: Vec<Stored<FormEntry>>,
}

impl Tables {
    pub fn workspace_is_live(&self, id: WorkspaceId) -> bool {
        self.workspaces
            .iter()
            .any(|w| !w.deleted && w.value.id() == id)
    }

    /// A live campaign whose workspace is also live.
    pub fn live_campaign(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns
            .iter()
            .find(|c| !c.deleted && c.value.id() == id)
            .map(|c| &c.value)
            .filter(|c| self.workspace_is_live(c.workspace_id()))
    }

    /// Any campaign row, deleted or not.
    pub fn any_campaign(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns
            .iter()
            .find(|c| c.value.id() == id)
            .map(|c| &c.value)
    }

    pub fn live_campaign_ids(&self, workspace_id: WorkspaceId) -> HashSet<CampaignId> {
        if !self.workspace_is_live(workspace_id) {
            return HashSet::new();
        }
        self.campaigns
            .iter()
            .filter(|c| !c.deleted && c.value.workspace_id() == workspace_id)
            .map(|c| c.value.id())
            .collect()
    }

    pub fn live_entry_count(&self, campaign_id: CampaignId) -> u64 {
        self.entries
            .iter()
            .filter(|e| !e.deleted && e.value.campaign_id() == campaign_id)
            .count() as u64
    }
}

/// Write steps that can be made to fail, to observe rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    /// Owner membership insert during workspace creation.
    MemberInsert,
    /// Any field insert, after the campaign header is staged.
    FieldInsert,
    /// Any option insert.
    AttributeInsert,
    /// Any submission detail insert, after the header is staged.
    DetailInsert,
}

/// In-memory implementation of every persistence port.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_points: Mutex<HashSet<FailPoint>>,
}

impl InMemoryStore {
    /// Empty store with the form catalog seeded.
    pub fn new() -> Self {
        let tables = Tables {
            form_types: FormType::seed(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
            fail_points: Mutex::new(HashSet::new()),
        }
    }

    // === Test Helpers ===

    /// Makes every following write that reaches `point` fail.
    pub fn fail_at(&self, point: FailPoint) {
        if let Ok(mut points) = self.fail_points.lock() {
            points.insert(point);
        }
    }

    /// Removes all failure injections.
    pub fn clear_failures(&self) {
        if let Ok(mut points) = self.fail_points.lock() {
            points.clear();
        }
    }

    /// Field rows for a campaign including soft-deleted ones, as `(row, deleted)`.
    pub fn raw_fields(&self, campaign_id: CampaignId) -> Vec<(CampaignForm, bool)> {
        self.tables
            .read()
            .map(|t| {
                t.forms
                    .iter()
                    .filter(|f| f.value.campaign_id == campaign_id)
                    .map(|f| (f.value.clone(), f.deleted))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of campaign header rows, deleted or not.
    pub fn campaign_row_count(&self) -> usize {
        self.tables.read().map(|t| t.campaigns.len()).unwrap_or(0)
    }

    /// Number of submission header rows, deleted or not.
    pub fn entry_row_count(&self) -> usize {
        self.tables.read().map(|t| t.entries.len()).unwrap_or(0)
    }

    // === Internals ===

    pub(super) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, DomainError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "store lock poisoned"))?;
        Ok(f(&tables))
    }

    /// Runs `f` against a staged copy and publishes it only on success.
    pub(super) fn write<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "store lock poisoned"))?;
        let mut staged = tables.clone();
        let result = f(&mut staged)?;
        *tables = staged;
        Ok(result)
    }

    pub(super) fn check(&self, point: FailPoint) -> Result<(), DomainError> {
        let armed = self
            .fail_points
            .lock()
            .map(|points| points.contains(&point))
            .unwrap_or(false);
        if armed {
            return Err(DomainError::database(format!(
                "injected failure at {:?}",
                point
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies an optional client ordering on top of the listing's natural order.
///
/// Sorting is stable, so ties keep the natural order.
pub(super) fn apply_sort<T>(
    items: &mut [T],
    sort: Option<&SortOrder>,
    by_column: impl Fn(&'static str, &T, &T) -> Ordering,
) {
    if let Some(order) = sort {
        items.sort_by(|a, b| {
            let ordering = by_column(order.column, a, b);
            match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}
