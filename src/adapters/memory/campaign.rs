//! Campaign, schema and catalog ports over the in-memory tables.

use async_trait::async_trait;

use super::store::{apply_sort, FailPoint, InMemoryStore, Stored, Tables};
use crate::domain::campaign::{
    Campaign, CampaignFormAttribute, Change, FieldDefinition, NewCampaign, ReconciliationPlan,
};
use crate::domain::form_catalog::FormType;
use crate::domain::foundation::{
    CampaignFormId, CampaignId, DomainError, ErrorCode, FormTypeId, Page, PageRequest,
    WorkspaceId,
};
use crate::ports::{
    CampaignFormView, CampaignReader, CampaignRepository, CampaignSummaryView, FormCatalogReader,
};

fn campaign_not_found(id: CampaignId) -> DomainError {
    DomainError::new(ErrorCode::CampaignNotFound, format!("Campaign not found: {}", id))
}

fn field_not_found(id: CampaignFormId) -> DomainError {
    DomainError::new(
        ErrorCode::CampaignFormNotFound,
        format!("Campaign form not found: {}", id),
    )
}

fn live_attributes(tables: &Tables, form_id: CampaignFormId) -> Vec<CampaignFormAttribute> {
    let mut attributes: Vec<CampaignFormAttribute> = tables
        .attributes
        .iter()
        .filter(|a| !a.deleted && a.value.campaign_form_id == form_id)
        .map(|a| a.value.clone())
        .collect();
    attributes.sort_by_key(|a| a.position);
    attributes
}

fn schema(tables: &Tables, campaign_id: CampaignId) -> Vec<FieldDefinition> {
    let mut forms: Vec<_> = tables
        .forms
        .iter()
        .filter(|f| !f.deleted && f.value.campaign_id == campaign_id)
        .map(|f| f.value.clone())
        .collect();
    forms.sort_by_key(|f| f.position);

    forms
        .into_iter()
        .map(|form| FieldDefinition {
            attributes: live_attributes(tables, form.id),
            form,
        })
        .collect()
}

fn form_view(tables: &Tables, def: FieldDefinition) -> CampaignFormView {
    let form_type = tables
        .form_types
        .iter()
        .find(|t| t.id == def.form.form_type_id);
    let form = def.form;

    CampaignFormView {
        id: form.id,
        campaign_id: form.campaign_id,
        form_type_id: form.form_type_id,
        form_code: form_type.map(|t| t.code.clone()).unwrap_or_default(),
        form_name: form_type.map(|t| t.name.clone()).unwrap_or_default(),
        title: form.title,
        description: form.description,
        placeholder: form.placeholder,
        default_value: form.default_value,
        is_required: form.is_required,
        is_multiple: form.is_multiple,
        position: form.position,
        attributes: def.attributes,
        created_at: form.created_at,
        updated_at: form.updated_at,
    }
}

impl InMemoryStore {
    fn apply_changes(&self, t: &mut Tables, plan: &ReconciliationPlan) -> Result<(), DomainError> {
        let campaign_id = plan.campaign.id();

        for change in &plan.fields {
            match change {
                Change::Create(form) => {
                    self.check(FailPoint::FieldInsert)?;
                    t.forms.push(Stored::live(form.clone()));
                }
                Change::Update(form) => {
                    let row = t
                        .forms
                        .iter_mut()
                        .find(|f| !f.deleted && f.value.id == form.id && f.value.campaign_id == campaign_id)
                        .ok_or_else(|| field_not_found(form.id))?;
                    row.value = form.clone();
                }
                Change::SoftDelete(id) => {
                    let row = t
                        .forms
                        .iter_mut()
                        .find(|f| !f.deleted && f.value.id == *id && f.value.campaign_id == campaign_id)
                        .ok_or_else(|| field_not_found(*id))?;
                    row.deleted = true;
                }
            }
        }

        for change in &plan.attributes {
            match change {
                Change::Create(attr) => {
                    self.check(FailPoint::AttributeInsert)?;
                    t.attributes.push(Stored::live(attr.clone()));
                }
                Change::Update(attr) => {
                    if let Some(row) = t.attributes.iter_mut().find(|a| !a.deleted && a.value.id == attr.id) {
                        row.value = attr.clone();
                    }
                }
                Change::SoftDelete(id) => {
                    if let Some(row) = t.attributes.iter_mut().find(|a| !a.deleted && a.value.id == *id) {
                        row.deleted = true;
                    }
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CampaignRepository for InMemoryStore {
    async fn create(&self, draft: &NewCampaign) -> Result<(), DomainError> {
        self.write(|t| {
            let key = draft.campaign.key();
            if t.campaigns.iter().any(|c| c.value.key() == key) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateKey,
                    format!("Campaign key already taken: {}", key),
                ));
            }
            t.campaigns.push(Stored::live(draft.campaign.clone()));

            for field in &draft.fields {
                self.check(FailPoint::FieldInsert)?;
                t.forms.push(Stored::live(field.form.clone()));
                for attr in &field.attributes {
                    self.check(FailPoint::AttributeInsert)?;
                    t.attributes.push(Stored::live(attr.clone()));
                }
            }
            Ok(())
        })
    }

    async fn apply(&self, plan: &ReconciliationPlan) -> Result<(), DomainError> {
        self.write(|t| {
            let id = plan.campaign.id();
            if t.live_campaign(id).is_none() {
                return Err(campaign_not_found(id));
            }
            if let Some(row) = t.campaigns.iter_mut().find(|c| c.value.id() == id) {
                row.value = plan.campaign.clone();
            }
            self.apply_changes(t, plan)
        })
    }

    async fn soft_delete(&self, id: CampaignId) -> Result<(), DomainError> {
        self.write(|t| {
            if t.live_campaign(id).is_none() {
                return Err(campaign_not_found(id));
            }
            if let Some(row) = t.campaigns.iter_mut().find(|c| c.value.id() == id) {
                row.deleted = true;
            }
            Ok(())
        })
    }

    async fn find(&self, id: CampaignId) -> Result<Option<Campaign>, DomainError> {
        self.read(|t| t.live_campaign(id).cloned())
    }

    async fn find_in_workspace(
        &self,
        workspace_id: WorkspaceId,
        id: CampaignId,
    ) -> Result<Option<Campaign>, DomainError> {
        self.read(|t| {
            t.live_campaign(id)
                .filter(|c| c.workspace_id() == workspace_id)
                .cloned()
        })
    }

    async fn find_by_key(
        &self,
        key: &str,
        is_publish: Option<bool>,
    ) -> Result<Option<Campaign>, DomainError> {
        self.read(|t| {
            t.campaigns
                .iter()
                .filter(|c| !c.deleted && c.value.key() == key)
                .filter_map(|c| t.live_campaign(c.value.id()))
                .find(|c| is_publish.map_or(true, |p| c.is_publish() == p))
                .cloned()
        })
    }

    async fn load_schema(&self, id: CampaignId) -> Result<Vec<FieldDefinition>, DomainError> {
        self.read(|t| schema(t, id))
    }
}

#[async_trait]
impl CampaignReader for InMemoryStore {
    async fn list(
        &self,
        workspace_id: WorkspaceId,
        request: &PageRequest,
    ) -> Result<Page<CampaignSummaryView>, DomainError> {
        self.read(|t| {
            let live = t.live_campaign_ids(workspace_id);
            let mut views: Vec<CampaignSummaryView> = t
                .campaigns
                .iter()
                .filter(|c| live.contains(&c.value.id()))
                .map(|c| &c.value)
                .filter(|c| request.matches_search(c.title()))
                .map(|c| CampaignSummaryView {
                    id: c.id(),
                    workspace_id: c.workspace_id(),
                    key: c.key().to_string(),
                    title: c.title().to_string(),
                    slug: c.slug().to_string(),
                    description: c.description().to_string(),
                    thumbnail: c.thumbnail().to_string(),
                    is_publish: c.is_publish(),
                    total_entry: t.live_entry_count(c.id()),
                    created_at: c.created_at(),
                    updated_at: c.updated_at(),
                })
                .collect();
            apply_sort(&mut views, request.sort.as_ref(), |column, a, b| match column {
                "title" => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                "updated_at" => a.updated_at.cmp(&b.updated_at),
                _ => a.created_at.cmp(&b.created_at),
            });
            Page::from_all(views, request)
        })
    }

    async fn forms_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CampaignFormView>, DomainError> {
        self.read(|t| {
            schema(t, campaign_id)
                .into_iter()
                .map(|def| form_view(t, def))
                .collect()
        })
    }

    async fn form_attributes(
        &self,
        campaign_form_id: CampaignFormId,
    ) -> Result<Vec<CampaignFormAttribute>, DomainError> {
        self.read(|t| live_attributes(t, campaign_form_id))
    }
}

#[async_trait]
impl FormCatalogReader for InMemoryStore {
    async fn list(&self, request: &PageRequest) -> Result<Page<FormType>, DomainError> {
        self.read(|t| {
            let mut types: Vec<FormType> = t
                .form_types
                .iter()
                .filter(|ft| request.matches_search(&ft.name))
                .cloned()
                .collect();
            apply_sort(&mut types, request.sort.as_ref(), |column, a, b| match column {
                "code" => a.code.cmp(&b.code),
                "name" => a.name.cmp(&b.name),
                _ => a.created_at.cmp(&b.created_at),
            });
            Page::from_all(types, request)
        })
    }

    async fn find(&self, id: FormTypeId) -> Result<Option<FormType>, DomainError> {
        self.read(|t| t.form_types.iter().find(|ft| ft.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<FormType>, DomainError> {
        self.read(|t| t.form_types.clone())
    }
}
