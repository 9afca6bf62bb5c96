//! Form type catalog - fixed, seeded field types.
//!
//! The catalog is reference data: it is written once by the initial migration
//! and never edited through this crate.

use crate::domain::foundation::{FormTypeId, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Codes whose fields carry selectable options.
pub const CHOICE_CODES: [&str; 3] = ["SELC_OPTION", "SELC_RADIO", "CHCK_BOX"];

/// Seeded catalog rows: stable id suffix, code, name.
///
/// Ids are `00000000-0000-0000-0000-0000000000NN` and must match the
/// initial migration.
const SEED: [(u128, &str, &str); 9] = [
    (1, "INPT_TEXT", "Text"),
    (2, "INPT_NUMBER", "Number"),
    (3, "INPT_EMAIL", "Email"),
    (4, "INPT_PASSWORD", "Password"),
    (5, "INPT_FILE", "Upload"),
    (6, "SELC_OPTION", "Select"),
    (7, "SELC_RADIO", "Radio"),
    (8, "CHCK_BOX", "Checkbox"),
    (9, "TXT_AREA", "Text Area"),
];

/// One field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormType {
    pub id: FormTypeId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
}

impl FormType {
    /// True for select, radio and checkbox types.
    pub fn is_choice(&self) -> bool {
        CHOICE_CODES.contains(&self.code.as_str())
    }

    /// The seeded catalog, in seed order.
    pub fn seed() -> Vec<FormType> {
        let now = Timestamp::now();
        SEED.iter()
            .map(|(n, code, name)| FormType {
                id: FormTypeId::from_uuid(Uuid::from_u128(*n)),
                code: code.to_string(),
                name: name.to_string(),
                description: format!("{} input", name),
                created_at: now,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_contains_nine_distinct_types() {
        let seed = FormType::seed();
        assert_eq!(seed.len(), 9);
        let mut ids: Vec<_> = seed.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn seed_ids_are_stable() {
        let text = &FormType::seed()[0];
        assert_eq!(text.code, "INPT_TEXT");
        assert_eq!(text.id.to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn only_select_radio_checkbox_are_choice() {
        let choice: Vec<_> = FormType::seed()
            .into_iter()
            .filter(FormType::is_choice)
            .map(|t| t.code)
            .collect();
        assert_eq!(choice, vec!["SELC_OPTION", "SELC_RADIO", "CHCK_BOX"]);
    }
}
