//! SubmitEntryHandler - Command handler for recording a form submission.

use std::sync::Arc;

use tracing::info;

use crate::domain::form_entry::{parse_answers, AnswerInput, FormEntry, FormEntryError};
use crate::domain::foundation::{CampaignId, Principal, ProductId};
use crate::ports::{CampaignRepository, FormEntryRepository};

/// Command to submit answers against a campaign.
#[derive(Debug, Clone)]
pub struct SubmitEntryCommand {
    pub campaign_id: CampaignId,
    /// Set when the submission comes from a product page.
    pub product_id: Option<ProductId>,
    pub answers: Vec<AnswerInput>,
}

/// Handler for submissions.
///
/// Anonymous callers are allowed and drafts accept entries; only a missing or
/// deleted campaign is refused. The header and every detail row are written
/// together. Answer field ids are not checked against the campaign's schema.
pub struct SubmitEntryHandler {
    campaigns: Arc<dyn CampaignRepository>,
    repository: Arc<dyn FormEntryRepository>,
}

impl SubmitEntryHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        repository: Arc<dyn FormEntryRepository>,
    ) -> Self {
        Self {
            campaigns,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitEntryCommand,
        principal: Option<&Principal>,
    ) -> Result<FormEntry, FormEntryError> {
        let answers = parse_answers(&cmd.answers)?;

        if self.campaigns.find(cmd.campaign_id).await?.is_none() {
            return Err(FormEntryError::campaign_not_found(cmd.campaign_id));
        }

        let entry = FormEntry::submit(
            cmd.campaign_id,
            principal.map(|p| p.user_id.clone()),
            cmd.product_id,
            answers,
        );
        self.repository.submit(&entry).await?;

        info!(
            entry_id = %entry.id(),
            campaign_id = %cmd.campaign_id,
            details = entry.details().len(),
            anonymous = principal.is_none(),
            "Form entry submitted"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::FailPoint;
    use crate::application::handlers::test_support::{
        campaign, store, text_field, user, workspace,
    };
    use crate::domain::form_entry::EntryStatus;
    use crate::ports::{CampaignReader, FormEntryReader};

    fn answer(field: &str, value: &str) -> AnswerInput {
        AnswerInput {
            campaign_form_id: field.to_string(),
            campaign_form_attribute_id: None,
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn records_pending_entry_with_one_detail_per_answer() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name"), text_field("City")])
            .await;
        let forms = store.forms_by_campaign(id).await.unwrap();
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());
        let bob = user("bob");

        let entry = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: id,
                    product_id: None,
                    answers: vec![
                        answer(&forms[0].id.to_string(), "Bob"),
                        answer(&forms[1].id.to_string(), "Oslo"),
                    ],
                },
                Some(&bob),
            )
            .await
            .unwrap();

        assert_eq!(entry.status(), EntryStatus::Pending);
        assert_eq!(entry.details().len(), 2);
        let history = store.history(&bob.user_id, &Default::default()).await.unwrap();
        assert_eq!(history.total, 1);
    }

    #[tokio::test]
    async fn anonymous_submission_has_no_user() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Email")]).await;
        let field = store.forms_by_campaign(id).await.unwrap()[0].id;
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());

        let entry = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: id,
                    product_id: Some(ProductId::new()),
                    answers: vec![answer(&field.to_string(), "a@b.c")],
                },
                None,
            )
            .await
            .unwrap();

        assert!(entry.user_id().is_none());
        assert!(entry.product_id().is_some());
    }

    #[tokio::test]
    async fn draft_campaign_accepts_owner_test_submission() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, false, vec![text_field("Name")]).await;
        let field = store.forms_by_campaign(id).await.unwrap()[0].id;
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());

        let entry = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: id,
                    product_id: None,
                    answers: vec![answer(&field.to_string(), "x")],
                },
                Some(&alice),
            )
            .await
            .unwrap();

        assert_eq!(entry.campaign_id(), id);
        assert_eq!(store.entry_row_count(), 1);
    }

    #[tokio::test]
    async fn deleted_campaign_rejects_submissions() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let field = store.forms_by_campaign(id).await.unwrap()[0].id;
        CampaignRepository::soft_delete(store.as_ref(), id).await.unwrap();
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());

        let result = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: id,
                    product_id: None,
                    answers: vec![answer(&field.to_string(), "x")],
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(FormEntryError::CampaignNotFound(c)) if c == id));
        assert_eq!(store.entry_row_count(), 0);
    }

    #[tokio::test]
    async fn unknown_campaign_rejects_submissions() {
        let store = store();
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());
        let missing = CampaignId::new();

        let result = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: missing,
                    product_id: None,
                    answers: vec![answer(&uuid::Uuid::new_v4().to_string(), "x")],
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(FormEntryError::CampaignNotFound(c)) if c == missing));
    }

    #[tokio::test]
    async fn no_answers_is_invalid() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![]).await;
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());

        let result = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: id,
                    product_id: None,
                    answers: vec![],
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(FormEntryError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn failed_detail_insert_leaves_no_header() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(&store, &alice, ws, true, vec![text_field("Name")]).await;
        let field = store.forms_by_campaign(id).await.unwrap()[0].id;
        store.fail_at(FailPoint::DetailInsert);
        let handler = SubmitEntryHandler::new(store.clone(), store.clone());

        let result = handler
            .handle(
                SubmitEntryCommand {
                    campaign_id: id,
                    product_id: None,
                    answers: vec![answer(&field.to_string(), "x")],
                },
                Some(&alice),
            )
            .await;

        assert!(matches!(result, Err(FormEntryError::Infrastructure(_))));
        assert_eq!(store.entry_row_count(), 0);
    }
}
