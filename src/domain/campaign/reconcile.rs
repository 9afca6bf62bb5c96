//! Three-way reconciliation of a campaign's form schema.
//!
//! The incoming field list is the complete desired state. Each field and each
//! option ends up in exactly one of three buckets:
//!
//! | Incoming              | Stored            | Change       |
//! |-----------------------|-------------------|--------------|
//! | carries a known id    | present           | `Update`     |
//! | no id                 | -                 | `Create`     |
//! | -                     | id not in payload | `SoftDelete` |
//!
//! Options of an updated field are diffed the same way against that field's
//! stored options. Options of a new field are all created.
//!
//! Planning is pure: it reads the stored schema, validates every id and
//! returns a [`ReconciliationPlan`] that a repository applies atomically.

use std::collections::{HashMap, HashSet};

use super::campaign::Campaign;
use super::schema::{
    AttributeSpec, CampaignForm, CampaignFormAttribute, FieldDefinition, FieldSpec,
};
use crate::domain::foundation::{CampaignFormAttributeId, CampaignFormId, ValidationError};

/// What happens to one persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T, Id> {
    Create(T),
    Update(T),
    SoftDelete(Id),
}

impl<T, Id> Change<T, Id> {
    pub fn is_create(&self) -> bool {
        matches!(self, Change::Create(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Change::Update(_))
    }

    pub fn is_soft_delete(&self) -> bool {
        matches!(self, Change::SoftDelete(_))
    }
}

pub type FieldChange = Change<CampaignForm, CampaignFormId>;
pub type AttributeChange = Change<CampaignFormAttribute, CampaignFormAttributeId>;

/// Everything one update writes.
///
/// Field changes precede attribute changes, so an option created for a new
/// field always finds its parent already inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub campaign: Campaign,
    pub fields: Vec<FieldChange>,
    pub attributes: Vec<AttributeChange>,
}

/// Counts per bucket, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub fields_created: usize,
    pub fields_updated: usize,
    pub fields_deleted: usize,
    pub attributes_created: usize,
    pub attributes_updated: usize,
    pub attributes_deleted: usize,
}

impl ReconciliationPlan {
    pub fn summary(&self) -> PlanSummary {
        let count = |pred: fn(&FieldChange) -> bool| self.fields.iter().filter(|c| pred(c)).count();
        let count_attr =
            |pred: fn(&AttributeChange) -> bool| self.attributes.iter().filter(|c| pred(c)).count();

        PlanSummary {
            fields_created: count(Change::is_create),
            fields_updated: count(Change::is_update),
            fields_deleted: count(Change::is_soft_delete),
            attributes_created: count_attr(Change::is_create),
            attributes_updated: count_attr(Change::is_update),
            attributes_deleted: count_attr(Change::is_soft_delete),
        }
    }
}

/// Builds the plan that turns `existing` into `incoming`.
///
/// `campaign` is the header as it should be stored afterwards.
///
/// # Errors
///
/// `InvalidFormat` naming the offending path when an incoming id appears
/// twice, or does not belong to this campaign (fields) or to its parent
/// field (options). Nothing is planned in that case.
pub fn plan(
    campaign: Campaign,
    existing: &[FieldDefinition],
    incoming: &[FieldSpec],
) -> Result<ReconciliationPlan, ValidationError> {
    let stored: HashMap<CampaignFormId, &FieldDefinition> =
        existing.iter().map(|def| (def.form.id, def)).collect();

    let kept = claimed_ids(
        incoming.iter().map(|spec| spec.id),
        |id| stored.contains_key(id),
        |i| format!("fields[{}].id", i),
        "field does not belong to this campaign",
    )?;

    let mut fields = Vec::new();
    let mut attributes = Vec::new();

    for (position, spec) in incoming.iter().enumerate() {
        let position = position as i32;
        match spec.id.and_then(|id| stored.get(&id)) {
            Some(current) => {
                fields.push(Change::Update(current.form.updated_with(position, spec)));
                attributes.extend(diff_attributes(
                    position as usize,
                    current,
                    &spec.attributes,
                )?);
            }
            None => {
                let form = CampaignForm::create(campaign.id(), position, spec);
                attributes.extend(spec.attributes.iter().enumerate().map(|(i, attr)| {
                    Change::Create(CampaignFormAttribute::create(form.id, i as i32, attr))
                }));
                fields.push(Change::Create(form));
            }
        }
    }

    // Stored order keeps deletes deterministic.
    fields.extend(
        existing
            .iter()
            .map(|def| def.form.id)
            .filter(|id| !kept.contains(id))
            .map(Change::SoftDelete),
    );

    Ok(ReconciliationPlan {
        campaign,
        fields,
        attributes,
    })
}

fn diff_attributes(
    field_index: usize,
    current: &FieldDefinition,
    incoming: &[AttributeSpec],
) -> Result<Vec<AttributeChange>, ValidationError> {
    let stored: HashMap<CampaignFormAttributeId, &CampaignFormAttribute> =
        current.attributes.iter().map(|a| (a.id, a)).collect();

    let kept = claimed_ids(
        incoming.iter().map(|spec| spec.id),
        |id| stored.contains_key(id),
        |i| format!("fields[{}].attributes[{}].id", field_index, i),
        "option does not belong to this field",
    )?;

    let mut changes: Vec<AttributeChange> = incoming
        .iter()
        .enumerate()
        .map(|(i, spec)| match spec.id.and_then(|id| stored.get(&id)) {
            Some(attr) => Change::Update(attr.updated_with(i as i32, spec)),
            None => Change::Create(CampaignFormAttribute::create(
                current.form.id,
                i as i32,
                spec,
            )),
        })
        .collect();

    changes.extend(
        current
            .attributes
            .iter()
            .map(|a| a.id)
            .filter(|id| !kept.contains(id))
            .map(Change::SoftDelete),
    );

    Ok(changes)
}

/// Collects the ids an incoming list claims, rejecting duplicates and ids
/// that are not among the stored ones.
fn claimed_ids<Id>(
    ids: impl Iterator<Item = Option<Id>>,
    is_stored: impl Fn(&Id) -> bool,
    path: impl Fn(usize) -> String,
    foreign_reason: &str,
) -> Result<HashSet<Id>, ValidationError>
where
    Id: std::hash::Hash + Eq + Copy,
{
    let mut claimed = HashSet::new();
    for (i, id) in ids.enumerate() {
        let Some(id) = id else { continue };
        if !is_stored(&id) {
            return Err(ValidationError::invalid_format(path(i), foreign_reason));
        }
        if !claimed.insert(id) {
            return Err(ValidationError::invalid_format(path(i), "id appears more than once"));
        }
    }
    Ok(claimed)
}
