//! Fixtures shared by handler tests.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::application::AccessGuard;
use crate::domain::campaign::{AttributeInput, FieldInput};
use crate::domain::form_catalog::FormType;
use crate::domain::form_entry::AnswerInput;
use crate::domain::foundation::{CampaignId, FormEntryId, Principal, UserId, WorkspaceId};
use crate::domain::workspace::{Workspace, WorkspaceMember};
use crate::ports::{CampaignReader, WorkspaceRepository};

use super::campaign::{CreateCampaignCommand, CreateCampaignHandler};
use super::form_entry::{SubmitEntryCommand, SubmitEntryHandler};

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

pub fn guard(store: &Arc<InMemoryStore>) -> AccessGuard {
    AccessGuard::new(store.clone())
}

pub fn user(id: &str) -> Principal {
    Principal::new(UserId::new(id).unwrap(), "user")
}

pub fn admin() -> Principal {
    Principal::new(UserId::new("root").unwrap(), "admin")
}

/// Workspace owned by `owner`.
pub async fn workspace(store: &Arc<InMemoryStore>, owner: &Principal) -> WorkspaceId {
    let ws = Workspace::new("Acme", "", true).unwrap();
    let membership = WorkspaceMember::owner(ws.id(), owner.user_id.clone());
    store.create_with_owner(&ws, &membership).await.unwrap();
    ws.id()
}

fn type_id(code: &str) -> String {
    FormType::seed()
        .into_iter()
        .find(|t| t.code == code)
        .map(|t| t.id.to_string())
        .unwrap()
}

pub fn text_field(title: &str) -> FieldInput {
    FieldInput {
        form_type_id: type_id("INPT_TEXT"),
        title: title.to_string(),
        ..FieldInput::default()
    }
}

pub fn select_field(title: &str, options: &[&str]) -> FieldInput {
    FieldInput {
        form_type_id: type_id("SELC_OPTION"),
        title: title.to_string(),
        attributes: options
            .iter()
            .map(|label| AttributeInput {
                label: label.to_string(),
                value: label.to_lowercase(),
                ..AttributeInput::default()
            })
            .collect(),
        ..FieldInput::default()
    }
}

/// Campaign created through the handler in a workspace `owner` can access.
pub async fn campaign(
    store: &Arc<InMemoryStore>,
    owner: &Principal,
    workspace_id: WorkspaceId,
    is_publish: bool,
    fields: Vec<FieldInput>,
) -> CampaignId {
    let handler = CreateCampaignHandler::new(
        guard(store),
        store.clone(),
        store.clone(),
    );
    let cmd = CreateCampaignCommand {
        workspace_id,
        title: "Spring Launch".to_string(),
        description: String::new(),
        is_publish,
        fields,
    };
    handler.handle(cmd, owner).await.unwrap().id()
}

/// Answers every live field of a campaign with `value`.
pub async fn submit(
    store: &Arc<InMemoryStore>,
    campaign_id: CampaignId,
    submitter: Option<&Principal>,
    value: &str,
) -> FormEntryId {
    let answers = store
        .forms_by_campaign(campaign_id)
        .await
        .unwrap()
        .iter()
        .map(|form| AnswerInput {
            campaign_form_id: form.id.to_string(),
            campaign_form_attribute_id: None,
            value: value.to_string(),
        })
        .collect();
    SubmitEntryHandler::new(store.clone(), store.clone())
        .handle(
            SubmitEntryCommand {
                campaign_id,
                product_id: None,
                answers,
            },
            submitter,
        )
        .await
        .unwrap()
        .id()
}
