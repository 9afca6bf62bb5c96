//! Submitted form entries.
//!
//! An entry is immutable once written: the header and all of its detail rows
//! are created together and nothing here edits them afterwards.

use crate::domain::foundation::{
    CampaignFormAttributeId, CampaignFormId, CampaignId, FormDetailEntryId, FormEntryId,
    ProductId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of a submission, persisted as a fixed short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryStatus {
    #[default]
    #[serde(rename = "S1")]
    Pending,
    #[serde(rename = "S2")]
    Approved,
    #[serde(rename = "S3")]
    Rejected,
}

impl EntryStatus {
    pub fn code(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "S1",
            EntryStatus::Approved => "S2",
            EntryStatus::Rejected => "S3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "Pending",
            EntryStatus::Approved => "Approved",
            EntryStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S1" => Ok(EntryStatus::Pending),
            "S2" => Ok(EntryStatus::Approved),
            "S3" => Ok(EntryStatus::Rejected),
            other => Err(format!("Unknown entry status: {}", other)),
        }
    }
}

/// One answer as sent by a submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub campaign_form_id: String,
    #[serde(default)]
    pub campaign_form_attribute_id: Option<String>,
    #[serde(default)]
    pub value: String,
}

/// Parsed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub campaign_form_id: CampaignFormId,
    pub campaign_form_attribute_id: Option<CampaignFormAttributeId>,
    pub value: String,
}

/// Parses answers, failing on the first malformed id. At least one answer is required.
pub fn parse_answers(inputs: &[AnswerInput]) -> Result<Vec<Answer>, ValidationError> {
    if inputs.is_empty() {
        return Err(ValidationError::empty_field("answers"));
    }

    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let campaign_form_id = CampaignFormId::parse_field(
                format!("answers[{}].campaign_form_id", i),
                &input.campaign_form_id,
            )?;
            let campaign_form_attribute_id = match input.campaign_form_attribute_id.as_deref() {
                None => None,
                Some(raw) if raw.trim().is_empty() => None,
                Some(raw) => Some(CampaignFormAttributeId::parse_field(
                    format!("answers[{}].campaign_form_attribute_id", i),
                    raw,
                )?),
            };
            Ok(Answer {
                campaign_form_id,
                campaign_form_attribute_id,
                value: input.value.clone(),
            })
        })
        .collect()
}

/// One answered field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDetailEntry {
    pub id: FormDetailEntryId,
    pub form_entry_id: FormEntryId,
    pub campaign_form_id: CampaignFormId,
    pub campaign_form_attribute_id: Option<CampaignFormAttributeId>,
    pub value: String,
    pub created_at: Timestamp,
}

/// Submission header together with its detail rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    id: FormEntryId,
    campaign_id: CampaignId,
    user_id: Option<UserId>,
    product_id: Option<ProductId>,
    status: EntryStatus,
    remark: String,
    details: Vec<FormDetailEntry>,
    created_at: Timestamp,
}

impl FormEntry {
    /// New pending submission with one detail row per answer.
    pub fn submit(
        campaign_id: CampaignId,
        user_id: Option<UserId>,
        product_id: Option<ProductId>,
        answers: Vec<Answer>,
    ) -> Self {
        let id = FormEntryId::new();
        let now = Timestamp::now();
        let details = answers
            .into_iter()
            .map(|answer| FormDetailEntry {
                id: FormDetailEntryId::new(),
                form_entry_id: id,
                campaign_form_id: answer.campaign_form_id,
                campaign_form_attribute_id: answer.campaign_form_attribute_id,
                value: answer.value,
                created_at: now,
            })
            .collect();

        Self {
            id,
            campaign_id,
            user_id,
            product_id,
            status: EntryStatus::Pending,
            remark: String::new(),
            details,
            created_at: now,
        }
    }

    pub fn id(&self) -> FormEntryId {
        self.id
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn remark(&self) -> &str {
        &self.remark
    }

    pub fn details(&self) -> &[FormDetailEntry] {
        &self.details
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_input(value: &str) -> AnswerInput {
        AnswerInput {
            campaign_form_id: CampaignFormId::new().to_string(),
            campaign_form_attribute_id: None,
            value: value.to_string(),
        }
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [EntryStatus::Pending, EntryStatus::Approved, EntryStatus::Rejected] {
            assert_eq!(status.code().parse::<EntryStatus>().unwrap(), status);
        }
        assert!("S4".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn parse_answers_requires_at_least_one() {
        assert!(matches!(
            parse_answers(&[]),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn parse_answers_reports_bad_attribute_id() {
        let mut bad = answer_input("Red");
        bad.campaign_form_attribute_id = Some("zzz".to_string());
        let err = parse_answers(&[answer_input("x"), bad]).unwrap_err();
        assert_eq!(err.field(), "answers[1].campaign_form_attribute_id");
    }

    #[test]
    fn submit_forces_pending_and_links_details() {
        let answers = parse_answers(&[answer_input("hello"), answer_input("world")]).unwrap();
        let entry = FormEntry::submit(CampaignId::new(), None, None, answers);

        assert_eq!(entry.status(), EntryStatus::Pending);
        assert_eq!(entry.details().len(), 2);
        assert!(entry.details().iter().all(|d| d.form_entry_id == entry.id()));
        assert!(entry.user_id().is_none());
    }
}
