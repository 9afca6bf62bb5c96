//! GetHistoryHandler - Query handler for the caller's own submissions.

use std::sync::Arc;

use crate::domain::form_entry::FormEntryError;
use crate::domain::foundation::{Page, Principal, QueryParams};
use crate::ports::{EntryView, FormEntryReader, HISTORY_SORT_COLUMNS};

/// Query for the caller's submission history. Search matches the campaign title.
#[derive(Debug, Clone, Default)]
pub struct GetHistoryQuery {
    pub params: QueryParams,
}

/// Handler for self-service history, newest first unless sorted otherwise.
pub struct GetHistoryHandler {
    reader: Arc<dyn FormEntryReader>,
}

impl GetHistoryHandler {
    pub fn new(reader: Arc<dyn FormEntryReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetHistoryQuery,
        principal: &Principal,
    ) -> Result<Page<EntryView>, FormEntryError> {
        let request = query.params.resolve(HISTORY_SORT_COLUMNS)?;
        Ok(self.reader.history(&principal.user_id, &request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::campaign::{DeleteCampaignCommand, DeleteCampaignHandler};
    use crate::application::handlers::test_support::{
        campaign, guard, store, submit, text_field, user, workspace,
    };

    #[tokio::test]
    async fn only_own_entries_newest_first() {
        let store = store();
        let alice = user("alice");
        let bob = user("bob");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let first = submit(&store, id, Some(&bob), "one").await;
        let second = submit(&store, id, Some(&bob), "two").await;
        submit(&store, id, Some(&alice), "other").await;
        submit(&store, id, None, "anon").await;
        let handler = GetHistoryHandler::new(store.clone());

        let page = handler.handle(GetHistoryQuery::default(), &bob).await.unwrap();

        let ids: Vec<_> = page.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(page.items[0].campaign_title, "Spring Launch");
        assert_eq!(page.items[0].status_label, "Pending");
    }

    #[tokio::test]
    async fn entries_survive_campaign_deletion() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        submit(&store, id, Some(&alice), "kept").await;
        DeleteCampaignHandler::new(guard(&store), store.clone())
            .handle(
                DeleteCampaignCommand {
                    workspace_id: ws,
                    campaign_id: id,
                },
                &alice,
            )
            .await
            .unwrap();
        let handler = GetHistoryHandler::new(store.clone());

        let page = handler.handle(GetHistoryQuery::default(), &alice).await.unwrap();

        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn search_filters_on_campaign_title() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        submit(&store, id, Some(&alice), "x").await;
        let handler = GetHistoryHandler::new(store.clone());

        let hit = handler
            .handle(
                GetHistoryQuery {
                    params: QueryParams::default().with_search("spring"),
                },
                &alice,
            )
            .await
            .unwrap();
        let miss = handler
            .handle(
                GetHistoryQuery {
                    params: QueryParams::default().with_search("autumn"),
                },
                &alice,
            )
            .await
            .unwrap();

        assert_eq!(hit.total, 1);
        assert_eq!(miss.total, 0);
    }
}
