//! DailyEntriesHandler - Query handler for a campaign's submission histogram.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{CampaignId, Principal, Timestamp, WorkspaceId};
use crate::domain::reporting::{DailyEntryCount, SUMMARY_WINDOW_DAYS};
use crate::ports::SummaryReader;

#[derive(Debug, Clone)]
pub struct DailyEntriesQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
}

/// Handler for per-day submission counts over the reporting window.
///
/// The window opens at UTC midnight of the oldest day. Gaps are not
/// zero-filled; a day without entries has no row.
pub struct DailyEntriesHandler {
    guard: AccessGuard,
    reader: Arc<dyn SummaryReader>,
}

impl DailyEntriesHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn SummaryReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: DailyEntriesQuery,
        principal: &Principal,
    ) -> Result<Vec<DailyEntryCount>, CampaignError> {
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;

        let since = Timestamp::start_of_day_days_ago(SUMMARY_WINDOW_DAYS);
        Ok(self.reader.daily_entries(query.campaign_id, since).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        campaign, guard, store, submit, text_field, user, workspace,
    };
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::form_entry::{Answer, FormEntry};
    use crate::ports::{CampaignReader, FormEntryRepository};

    /// Pending entry for `campaign_id` whose header is stamped at `at`.
    async fn backdated_entry(
        store: &Arc<InMemoryStore>,
        campaign_id: CampaignId,
        at: Timestamp,
    ) {
        let answers = store
            .forms_by_campaign(campaign_id)
            .await
            .unwrap()
            .iter()
            .map(|form| Answer {
                campaign_form_id: form.id,
                campaign_form_attribute_id: None,
                value: "early".to_string(),
            })
            .collect();
        let mut json =
            serde_json::to_value(FormEntry::submit(campaign_id, None, None, answers)).unwrap();
        json["created_at"] = serde_json::to_value(at).unwrap();
        let entry: FormEntry = serde_json::from_value(json).unwrap();
        store.submit(&entry).await.unwrap();
    }

    #[tokio::test]
    async fn first_day_of_window_counts_from_midnight() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let opening = Timestamp::start_of_day_days_ago(SUMMARY_WINDOW_DAYS);
        let just_after_midnight = Timestamp::from_datetime(
            *opening.as_datetime() + chrono::Duration::seconds(1),
        );
        let day_before = opening.minus_days(1);
        backdated_entry(&store, id, just_after_midnight).await;
        backdated_entry(&store, id, day_before).await;
        let handler = DailyEntriesHandler::new(guard(&store), store.clone());

        let rows = handler
            .handle(
                DailyEntriesQuery {
                    workspace_id: ws,
                    campaign_id: id,
                },
                &alice,
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, opening.date());
        assert_eq!(rows[0].total, 1);
    }

    #[tokio::test]
    async fn todays_entries_share_one_bucket() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let other = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        submit(&store, id, None, "a").await;
        submit(&store, id, None, "b").await;
        submit(&store, other, None, "elsewhere").await;
        let handler = DailyEntriesHandler::new(guard(&store), store.clone());

        let rows = handler
            .handle(
                DailyEntriesQuery {
                    workspace_id: ws,
                    campaign_id: id,
                },
                &alice,
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[0].date, Timestamp::now().date());
    }

    #[tokio::test]
    async fn campaign_without_entries_has_no_rows() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let handler = DailyEntriesHandler::new(guard(&store), store.clone());

        let rows = handler
            .handle(
                DailyEntriesQuery {
                    workspace_id: ws,
                    campaign_id: id,
                },
                &alice,
            )
            .await
            .unwrap();

        assert!(rows.is_empty());
    }
}
