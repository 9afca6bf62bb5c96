//! Dynamic form schema: field definitions and their selectable options.
//!
//! Client payloads arrive as [`FieldInput`] with raw string ids. They are
//! parsed into [`FieldSpec`] up front so that a malformed id fails the whole
//! operation before anything is written.

use crate::domain::foundation::{
    required_text, CampaignFormAttributeId, CampaignFormId, CampaignId, FormTypeId, Timestamp,
    ValidationError,
};
use crate::domain::form_catalog::FormType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum length for a field title or an attribute label.
pub const MAX_LABEL_LENGTH: usize = 255;

/// One field definition of a campaign form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignForm {
    pub id: CampaignFormId,
    pub campaign_id: CampaignId,
    pub form_type_id: FormTypeId,
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub default_value: String,
    pub is_required: bool,
    pub is_multiple: bool,
    /// Display position within the form, zero based.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CampaignForm {
    /// Fresh field built from a spec; any id on the spec is ignored.
    pub fn create(campaign_id: CampaignId, position: i32, spec: &FieldSpec) -> Self {
        let now = Timestamp::now();
        Self {
            id: CampaignFormId::new(),
            campaign_id,
            form_type_id: spec.form_type_id,
            title: spec.title.clone(),
            description: spec.description.clone(),
            placeholder: spec.placeholder.clone(),
            default_value: spec.default_value.clone(),
            is_required: spec.is_required,
            is_multiple: spec.is_multiple,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this field with the spec's values applied in place.
    pub fn updated_with(&self, position: i32, spec: &FieldSpec) -> Self {
        Self {
            form_type_id: spec.form_type_id,
            title: spec.title.clone(),
            description: spec.description.clone(),
            placeholder: spec.placeholder.clone(),
            default_value: spec.default_value.clone(),
            is_required: spec.is_required,
            is_multiple: spec.is_multiple,
            position,
            updated_at: Timestamp::now(),
            ..self.clone()
        }
    }
}

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFormAttribute {
    pub id: CampaignFormAttributeId,
    pub campaign_form_id: CampaignFormId,
    pub label: String,
    pub value: String,
    pub is_default: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CampaignFormAttribute {
    pub fn create(campaign_form_id: CampaignFormId, position: i32, spec: &AttributeSpec) -> Self {
        let now = Timestamp::now();
        Self {
            id: CampaignFormAttributeId::new(),
            campaign_form_id,
            label: spec.label.clone(),
            value: spec.value.clone(),
            is_default: spec.is_default,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn updated_with(&self, position: i32, spec: &AttributeSpec) -> Self {
        Self {
            label: spec.label.clone(),
            value: spec.value.clone(),
            is_default: spec.is_default,
            position,
            updated_at: Timestamp::now(),
            ..self.clone()
        }
    }
}

/// A field together with its live options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub form: CampaignForm,
    pub attributes: Vec<CampaignFormAttribute>,
}

// ════════════════════════════════════════════════════════════════════════════
// Client payload
// ════════════════════════════════════════════════════════════════════════════

/// Field as sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInput {
    /// Present for existing fields, absent for new ones.
    #[serde(default)]
    pub id: Option<String>,
    pub form_type_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_multiple: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeInput>,
}

/// Option as sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInput {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Parsed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: Option<CampaignFormId>,
    pub form_type_id: FormTypeId,
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub default_value: String,
    pub is_required: bool,
    pub is_multiple: bool,
    pub attributes: Vec<AttributeSpec>,
}

/// Parsed option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub id: Option<CampaignFormAttributeId>,
    pub label: String,
    pub value: String,
    pub is_default: bool,
}

/// Parses every field and option, failing on the first bad value.
///
/// Error fields are paths such as `fields[1].attributes[0].id`.
pub fn parse_fields(inputs: &[FieldInput]) -> Result<Vec<FieldSpec>, ValidationError> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| parse_field(i, input))
        .collect()
}

fn parse_field(index: usize, input: &FieldInput) -> Result<FieldSpec, ValidationError> {
    let path = format!("fields[{}]", index);

    let id = optional_id(input.id.as_deref(), |raw| {
        CampaignFormId::parse_field(format!("{}.id", path), raw)
    })?;
    let form_type_id = FormTypeId::parse_field(format!("{}.form_type_id", path), &input.form_type_id)?;
    let title = required_text(&format!("{}.title", path), &input.title, MAX_LABEL_LENGTH)?;

    let attributes = input
        .attributes
        .iter()
        .enumerate()
        .map(|(j, attr)| {
            let attr_path = format!("{}.attributes[{}]", path, j);
            Ok(AttributeSpec {
                id: optional_id(attr.id.as_deref(), |raw| {
                    CampaignFormAttributeId::parse_field(format!("{}.id", attr_path), raw)
                })?,
                label: required_text(&format!("{}.label", attr_path), &attr.label, MAX_LABEL_LENGTH)?,
                value: bounded_text(&format!("{}.value", attr_path), &attr.value)?,
                is_default: attr.is_default,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(FieldSpec {
        id,
        form_type_id,
        title,
        description: input.description.clone(),
        placeholder: bounded_text(&format!("{}.placeholder", path), &input.placeholder)?,
        default_value: bounded_text(&format!("{}.default_value", path), &input.default_value)?,
        is_required: input.is_required,
        is_multiple: input.is_multiple,
        attributes,
    })
}

/// Optional text kept as sent, capped at the label length.
fn bounded_text(field: &str, value: &str) -> Result<String, ValidationError> {
    if value.chars().count() > MAX_LABEL_LENGTH {
        return Err(ValidationError::too_long(field, MAX_LABEL_LENGTH));
    }
    Ok(value.to_string())
}

/// Blank ids count as absent.
fn optional_id<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse(raw).map(Some),
    }
}

/// Checks every field references a catalog type, and that only choice
/// types carry options.
pub fn check_form_types(
    specs: &[FieldSpec],
    catalog: &[FormType],
) -> Result<(), ValidationError> {
    let by_id: HashMap<FormTypeId, &FormType> = catalog.iter().map(|t| (t.id, t)).collect();

    for (i, spec) in specs.iter().enumerate() {
        let path = format!("fields[{}].form_type_id", i);
        let form_type = by_id.get(&spec.form_type_id).ok_or_else(|| {
            ValidationError::invalid_format(&path, format!("unknown form type {}", spec.form_type_id))
        })?;
        if !spec.attributes.is_empty() && !form_type.is_choice() {
            return Err(ValidationError::invalid_format(
                format!("fields[{}].attributes", i),
                format!("{} fields do not take options", form_type.code),
            ));
        }
    }
    Ok(())
}
