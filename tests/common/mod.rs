//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use kiraform::adapters::memory::InMemoryStore;
use kiraform::application::handlers::{
    CreateCampaignCommand, CreateCampaignHandler, CreateWorkspaceCommand, CreateWorkspaceHandler,
    UpdateCampaignCommand, UpdateCampaignHandler,
};
use kiraform::application::AccessGuard;
use kiraform::domain::campaign::{AttributeInput, FieldInput};
use kiraform::domain::form_catalog::FormType;
use kiraform::domain::foundation::{CampaignId, Principal, UserId, WorkspaceId};
use kiraform::ports::{CampaignFormView, CampaignReader};

pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub owner: Principal,
    pub workspace_id: WorkspaceId,
}

impl Fixture {
    /// Store with one workspace owned by `owner`.
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let owner = principal("owner", "user");
        let workspace = CreateWorkspaceHandler::new(store.clone())
            .handle(
                CreateWorkspaceCommand {
                    title: "Acme Studio".to_string(),
                    description: String::new(),
                    is_publish: true,
                },
                &owner,
            )
            .await
            .unwrap();

        Self {
            store,
            workspace_id: workspace.id(),
            owner,
        }
    }

    pub fn guard(&self) -> AccessGuard {
        AccessGuard::new(self.store.clone())
    }

    pub async fn create_campaign(&self, fields: Vec<FieldInput>) -> Result<CampaignId, String> {
        CreateCampaignHandler::new(self.guard(), self.store.clone(), self.store.clone())
            .handle(
                CreateCampaignCommand {
                    workspace_id: self.workspace_id,
                    title: "Summer Giveaway".to_string(),
                    description: "Enter to win".to_string(),
                    is_publish: true,
                    fields,
                },
                &self.owner,
            )
            .await
            .map(|c| c.id())
            .map_err(|e| e.to_string())
    }

    pub async fn update_fields(
        &self,
        campaign_id: CampaignId,
        fields: Vec<FieldInput>,
    ) -> Result<(), String> {
        UpdateCampaignHandler::new(self.guard(), self.store.clone(), self.store.clone())
            .handle(
                UpdateCampaignCommand {
                    workspace_id: self.workspace_id,
                    campaign_id,
                    title: "Summer Giveaway".to_string(),
                    description: "Enter to win".to_string(),
                    is_publish: true,
                    fields,
                },
                &self.owner,
            )
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    pub async fn forms(&self, campaign_id: CampaignId) -> Vec<CampaignFormView> {
        self.store.forms_by_campaign(campaign_id).await.unwrap()
    }
}

pub fn principal(id: &str, role: &str) -> Principal {
    Principal::new(UserId::new(id).unwrap(), role)
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

pub fn choice_field(title: &str, options: &[&str]) -> FieldInput {
    FieldInput {
        form_type_id: type_id("SELC_RADIO"),
        title: title.to_string(),
        attributes: options.iter().map(|label| option(None, label)).collect(),
        ..FieldInput::default()
    }
}

pub fn option(id: Option<String>, label: &str) -> AttributeInput {
    AttributeInput {
        id,
        label: label.to_string(),
        value: label.to_lowercase(),
        is_default: false,
    }
}

/// Echoes a stored field back as an update payload entry.
pub fn existing(view: &CampaignFormView) -> FieldInput {
    FieldInput {
        id: Some(view.id.to_string()),
        form_type_id: view.form_type_id.to_string(),
        title: view.title.clone(),
        description: view.description.clone(),
        placeholder: view.placeholder.clone(),
        default_value: view.default_value.clone(),
        is_required: view.is_required,
        is_multiple: view.is_multiple,
        attributes: view
            .attributes
            .iter()
            .map(|a| option(Some(a.id.to_string()), &a.label))
            .collect(),
    }
}
