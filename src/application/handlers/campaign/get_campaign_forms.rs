//! Query handlers for a campaign's fields and a field's options.

use std::sync::Arc;

use crate::application::AccessGuard;
use crate::domain::campaign::{CampaignError, CampaignFormAttribute};
use crate::domain::foundation::{CampaignFormId, CampaignId, Principal, WorkspaceId};
use crate::ports::{CampaignFormView, CampaignReader};

/// Query for the live fields of a campaign.
#[derive(Debug, Clone)]
pub struct GetCampaignFormsQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
}

/// Handler for listing a campaign's fields, each with its options.
pub struct GetCampaignFormsHandler {
    guard: AccessGuard,
    reader: Arc<dyn CampaignReader>,
}

impl GetCampaignFormsHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn CampaignReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: GetCampaignFormsQuery,
        principal: &Principal,
    ) -> Result<Vec<CampaignFormView>, CampaignError> {
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;
        Ok(self.reader.forms_by_campaign(query.campaign_id).await?)
    }
}

/// Query for the live options of one field.
#[derive(Debug, Clone)]
pub struct GetFormAttributesQuery {
    pub workspace_id: WorkspaceId,
    pub campaign_id: CampaignId,
    pub campaign_form_id: CampaignFormId,
}

/// Handler for listing a field's options.
pub struct GetFormAttributesHandler {
    guard: AccessGuard,
    reader: Arc<dyn CampaignReader>,
}

impl GetFormAttributesHandler {
    pub fn new(guard: AccessGuard, reader: Arc<dyn CampaignReader>) -> Self {
        Self { guard, reader }
    }

    pub async fn handle(
        &self,
        query: GetFormAttributesQuery,
        principal: &Principal,
    ) -> Result<Vec<CampaignFormAttribute>, CampaignError> {
        self.guard
            .require_campaign(principal, query.workspace_id, query.campaign_id)
            .await?;

        let owned = self
            .reader
            .forms_by_campaign(query.campaign_id)
            .await?
            .iter()
            .any(|form| form.id == query.campaign_form_id);
        if !owned {
            return Err(CampaignError::field_not_found(query.campaign_form_id));
        }

        Ok(self.reader.form_attributes(query.campaign_form_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        campaign, guard, select_field, store, text_field, user, workspace,
    };

    #[tokio::test]
    async fn lists_fields_then_options_of_one_field() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let id = campaign(
            &store,
            &alice,
            ws,
            true,
            vec![text_field("Name"), select_field("Drink", &["Tea", "Coffee"])],
        )
        .await;

        let forms = GetCampaignFormsHandler::new(guard(&store), store.clone())
            .handle(
                GetCampaignFormsQuery {
                    workspace_id: ws,
                    campaign_id: id,
                },
                &alice,
            )
            .await
            .unwrap();
        let options = GetFormAttributesHandler::new(guard(&store), store.clone())
            .handle(
                GetFormAttributesQuery {
                    workspace_id: ws,
                    campaign_id: id,
                    campaign_form_id: forms[1].id,
                },
                &alice,
            )
            .await
            .unwrap();

        assert_eq!(forms.len(), 2);
        let labels: Vec<_> = options.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Tea", "Coffee"]);
    }

    #[tokio::test]
    async fn field_of_another_campaign_is_not_found() {
        let store = store();
        let alice = user("alice");
        let ws = workspace(&store, &alice).await;
        let mine = campaign(&store, &alice, ws, true, vec![]).await;
        let theirs = campaign(&store, &alice, ws, true, vec![select_field("X", &["1"])]).await;
        let foreign = store.forms_by_campaign(theirs).await.unwrap()[0].id;

        let result = GetFormAttributesHandler::new(guard(&store), store.clone())
            .handle(
                GetFormAttributesQuery {
                    workspace_id: ws,
                    campaign_id: mine,
                    campaign_form_id: foreign,
                },
                &alice,
            )
            .await;

        assert!(matches!(result, Err(CampaignError::FieldNotFound(id)) if id == foreign));
    }
}
