//! Submission and reporting ports over the in-memory tables.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::store::{apply_sort, FailPoint, InMemoryStore, Stored, Tables};
use crate::domain::form_entry::FormEntry;
use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, FormEntryId, Page, PageRequest, Timestamp, UserId,
    WorkspaceId,
};
use crate::domain::reporting::{DailyEntryCount, WorkspaceSummary};
use crate::ports::{
    DetailView, EntryDetail, EntryView, FormEntryReader, FormEntryRepository, SummaryReader,
};

/// Header view; entries whose campaign row is missing are skipped.
fn entry_view(tables: &Tables, entry: &FormEntry) -> Option<EntryView> {
    let campaign = tables.any_campaign(entry.campaign_id())?;
    Some(EntryView {
        id: entry.id(),
        campaign_id: entry.campaign_id(),
        campaign_key: campaign.key().to_string(),
        campaign_title: campaign.title().to_string(),
        user_id: entry.user_id().cloned(),
        product_id: entry.product_id(),
        status: entry.status(),
        status_label: entry.status().label().to_string(),
        remark: entry.remark().to_string(),
        created_at: entry.created_at(),
    })
}

/// Detail rows enriched with the field as it is now, deleted or not.
fn entry_detail(tables: &Tables, entry: &FormEntry) -> Option<EntryDetail> {
    let header = entry_view(tables, entry)?;

    let mut details: Vec<(i32, DetailView)> = entry
        .details()
        .iter()
        .map(|d| {
            let field = tables
                .forms
                .iter()
                .find(|f| f.value.id == d.campaign_form_id)
                .map(|f| &f.value);
            let form_type = field.and_then(|f| {
                tables
                    .form_types
                    .iter()
                    .find(|t| t.id == f.form_type_id)
            });
            let view = DetailView {
                id: d.id,
                campaign_form_id: d.campaign_form_id,
                campaign_form_attribute_id: d.campaign_form_attribute_id,
                field_title: field.map(|f| f.title.clone()).unwrap_or_default(),
                field_description: field.map(|f| f.description.clone()).unwrap_or_default(),
                form_code: form_type.map(|t| t.code.clone()).unwrap_or_default(),
                form_name: form_type.map(|t| t.name.clone()).unwrap_or_default(),
                value: d.value.clone(),
                created_at: d.created_at,
            };
            (field.map_or(i32::MAX, |f| f.position), view)
        })
        .collect();
    details.sort_by_key(|(position, _)| *position);

    Some(EntryDetail {
        entry: header,
        details: details.into_iter().map(|(_, view)| view).collect(),
    })
}

fn sort_entries(views: &mut [EntryView], request: &PageRequest) {
    apply_sort(views, request.sort.as_ref(), |column, a, b| match column {
        "campaign_title" => a
            .campaign_title
            .to_lowercase()
            .cmp(&b.campaign_title.to_lowercase()),
        "user_id" => a.user_id.cmp(&b.user_id),
        _ => a.created_at.cmp(&b.created_at),
    });
}

#[async_trait]
impl FormEntryRepository for InMemoryStore {
    async fn submit(&self, entry: &FormEntry) -> Result<(), DomainError> {
        self.write(|t| {
            t.entries.push(Stored::live(entry.clone()));
            for _ in entry.details() {
                self.check(FailPoint::DetailInsert)?;
            }
            Ok(())
        })
    }

    async fn soft_delete(
        &self,
        campaign_id: CampaignId,
        id: FormEntryId,
    ) -> Result<(), DomainError> {
        self.write(|t| {
            let row = t
                .entries
                .iter_mut()
                .find(|e| !e.deleted && e.value.id() == id && e.value.campaign_id() == campaign_id)
                .ok_or_else(|| {
                    DomainError::new(ErrorCode::FormEntryNotFound, format!("Form entry not found: {}", id))
                })?;
            row.deleted = true;
            Ok(())
        })
    }
}

#[async_trait]
impl FormEntryReader for InMemoryStore {
    async fn history(
        &self,
        user_id: &UserId,
        request: &PageRequest,
    ) -> Result<Page<EntryView>, DomainError> {
        self.read(|t| {
            // Newest first by default: walk insertion order backwards.
            let mut views: Vec<EntryView> = t
                .entries
                .iter()
                .rev()
                .filter(|e| !e.deleted && e.value.user_id() == Some(user_id))
                .filter_map(|e| entry_view(t, &e.value))
                .filter(|v| request.matches_search(&v.campaign_title))
                .collect();
            sort_entries(&mut views, request);
            Page::from_all(views, request)
        })
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
        id: FormEntryId,
    ) -> Result<Option<EntryDetail>, DomainError> {
        self.read(|t| {
            t.entries
                .iter()
                .find(|e| !e.deleted && e.value.id() == id && e.value.user_id() == Some(user_id))
                .and_then(|e| entry_detail(t, &e.value))
        })
    }

    async fn list_by_campaign(
        &self,
        campaign_id: CampaignId,
        request: &PageRequest,
    ) -> Result<Page<EntryView>, DomainError> {
        self.read(|t| {
            let mut views: Vec<EntryView> = t
                .entries
                .iter()
                .filter(|e| !e.deleted && e.value.campaign_id() == campaign_id)
                .filter(|e| {
                    request.matches_search(e.value.user_id().map_or("", UserId::as_str))
                })
                .filter_map(|e| entry_view(t, &e.value))
                .collect();
            sort_entries(&mut views, request);
            Page::from_all(views, request)
        })
    }

    async fn find_in_campaign(
        &self,
        campaign_id: CampaignId,
        id: FormEntryId,
    ) -> Result<Option<EntryDetail>, DomainError> {
        self.read(|t| {
            t.entries
                .iter()
                .find(|e| !e.deleted && e.value.id() == id && e.value.campaign_id() == campaign_id)
                .and_then(|e| entry_detail(t, &e.value))
        })
    }
}

#[async_trait]
impl SummaryReader for InMemoryStore {
    async fn count_entries_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<u64, DomainError> {
        self.read(|t| {
            if t.live_campaign(campaign_id).is_none() {
                return 0;
            }
            t.live_entry_count(campaign_id)
        })
    }

    async fn workspace_summary(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<WorkspaceSummary, DomainError> {
        self.read(|t| {
            let campaigns = t.live_campaign_ids(workspace_id);
            let total_entry = campaigns.iter().map(|id| t.live_entry_count(*id)).sum();
            WorkspaceSummary {
                total_campaign: campaigns.len() as u64,
                total_entry,
            }
        })
    }

    async fn daily_entries(
        &self,
        campaign_id: CampaignId,
        since: Timestamp,
    ) -> Result<Vec<DailyEntryCount>, DomainError> {
        self.read(|t| {
            if t.live_campaign(campaign_id).is_none() {
                return Vec::new();
            }
            let mut per_day = BTreeMap::new();
            for entry in t
                .entries
                .iter()
                .filter(|e| !e.deleted && e.value.campaign_id() == campaign_id)
                .filter(|e| !e.value.created_at().is_before(&since))
            {
                *per_day.entry(entry.value.created_at().date()).or_insert(0u64) += 1;
            }
            per_day
                .into_iter()
                .map(|(date, total)| DailyEntryCount { date, total })
                .collect()
        })
    }
}
