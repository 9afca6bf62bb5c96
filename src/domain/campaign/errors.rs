//! Campaign-specific error types.

use crate::domain::foundation::{
    CampaignFormId, CampaignId, DomainError, ErrorCode, ErrorKind, FormTypeId, ValidationError,
};

/// Campaign aggregate errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignError {
    /// Campaign was not found or is deleted.
    NotFound(CampaignId),
    /// No campaign carries this public key.
    KeyNotFound(String),
    /// Field is missing, deleted or belongs to another campaign.
    FieldNotFound(CampaignFormId),
    /// No catalog entry carries this id.
    FormTypeNotFound(FormTypeId),
    /// Caller lacks rights on the campaign or its workspace.
    Forbidden,
    /// Payload failed validation before any write.
    ValidationFailed { field: String, message: String },
    /// Key generation kept colliding.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl CampaignError {
    pub fn not_found(id: CampaignId) -> Self {
        CampaignError::NotFound(id)
    }
    pub fn key_not_found(key: impl Into<String>) -> Self {
        CampaignError::KeyNotFound(key.into())
    }
    pub fn field_not_found(id: CampaignFormId) -> Self {
        CampaignError::FieldNotFound(id)
    }
    pub fn forbidden() -> Self {
        CampaignError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CampaignError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        CampaignError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CampaignError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CampaignError::NotFound(_) | CampaignError::KeyNotFound(_) => {
                ErrorCode::CampaignNotFound
            }
            CampaignError::FieldNotFound(_) => ErrorCode::CampaignFormNotFound,
            CampaignError::FormTypeNotFound(_) => ErrorCode::FormTypeNotFound,
            CampaignError::Forbidden => ErrorCode::Forbidden,
            CampaignError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CampaignError::Conflict(_) => ErrorCode::DuplicateKey,
            CampaignError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
    pub fn message(&self) -> String {
        match self {
            CampaignError::NotFound(id) => format!("Campaign not found: {}", id),
            CampaignError::KeyNotFound(key) => format!("Campaign not found for key: {}", key),
            CampaignError::FieldNotFound(id) => format!("Campaign form not found: {}", id),
            CampaignError::FormTypeNotFound(id) => format!("Form type not found: {}", id),
            CampaignError::Forbidden => "Permission denied".to_string(),
            CampaignError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CampaignError::Conflict(msg) => msg.clone(),
            CampaignError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CampaignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CampaignError {}

impl From<ValidationError> for CampaignError {
    fn from(err: ValidationError) -> Self {
        CampaignError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for CampaignError {
    fn from(err: DomainError) -> Self {
        match err.code.kind() {
            ErrorKind::Forbidden | ErrorKind::Unauthenticated => CampaignError::Forbidden,
            ErrorKind::Conflict => CampaignError::Conflict(err.message),
            ErrorKind::InvalidArgument => CampaignError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CampaignError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payload_is_invalid_argument() {
        let err: CampaignError = ValidationError::invalid_format("fields[0].id", "bad").into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(err, CampaignError::ValidationFailed { ref field, .. } if field == "fields[0].id"));
    }

    #[test]
    fn not_found_by_key_is_not_found() {
        assert_eq!(CampaignError::key_not_found("abc").kind(), ErrorKind::NotFound);
    }

    #[test]
    fn duplicate_key_maps_to_conflict() {
        let err: CampaignError = DomainError::new(ErrorCode::DuplicateKey, "key taken").into();
        assert_eq!(err, CampaignError::Conflict("key taken".to_string()));
    }

    #[test]
    fn database_error_is_unavailable() {
        let err: CampaignError = DomainError::database("pool timed out").into();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }
}
