//! Campaign module - campaign headers, dynamic form schema and its reconciliation.

mod campaign;
mod errors;
pub mod reconcile;
mod schema;

pub use campaign::{Campaign, CampaignHeader, MAX_TITLE_LENGTH};
pub use errors::CampaignError;
pub use reconcile::{AttributeChange, Change, FieldChange, PlanSummary, ReconciliationPlan};
pub use schema::{
    check_form_types, parse_fields, AttributeInput, AttributeSpec, CampaignForm,
    CampaignFormAttribute, FieldDefinition, FieldInput, FieldSpec, MAX_LABEL_LENGTH,
};

/// A campaign and its complete initial schema, written in one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub campaign: Campaign,
    pub fields: Vec<FieldDefinition>,
}

impl NewCampaign {
    /// Assigns fresh ids to every field and option, tagging each with its parent.
    pub fn build(campaign: Campaign, specs: &[FieldSpec]) -> Self {
        let fields = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let form = CampaignForm::create(campaign.id(), i as i32, spec);
                let attributes = spec
                    .attributes
                    .iter()
                    .enumerate()
                    .map(|(j, attr)| CampaignFormAttribute::create(form.id, j as i32, attr))
                    .collect();
                FieldDefinition { form, attributes }
            })
            .collect();

        Self { campaign, fields }
    }

    /// Number of option rows across all fields.
    pub fn attribute_count(&self) -> usize {
        self.fields.iter().map(|f| f.attributes.len()).sum()
    }
}
