//! Form-entry error types.

use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, ErrorKind, FormEntryId, ValidationError,
};

/// Submission and history errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEntryError {
    /// Entry was not found, is deleted, or is not visible to the caller.
    NotFound(FormEntryId),
    /// Target campaign is missing, deleted or unpublished.
    CampaignNotFound(CampaignId),
    /// Caller lacks rights on the campaign.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl FormEntryError {
    pub fn not_found(id: FormEntryId) -> Self {
        FormEntryError::NotFound(id)
    }
    pub fn campaign_not_found(id: CampaignId) -> Self {
        FormEntryError::CampaignNotFound(id)
    }
    pub fn forbidden() -> Self {
        FormEntryError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FormEntryError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        FormEntryError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            FormEntryError::NotFound(_) => ErrorCode::FormEntryNotFound,
            FormEntryError::CampaignNotFound(_) => ErrorCode::CampaignNotFound,
            FormEntryError::Forbidden => ErrorCode::Forbidden,
            FormEntryError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            FormEntryError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
    pub fn message(&self) -> String {
        match self {
            FormEntryError::NotFound(id) => format!("Form entry not found: {}", id),
            FormEntryError::CampaignNotFound(id) => format!("Campaign not found: {}", id),
            FormEntryError::Forbidden => "Permission denied".to_string(),
            FormEntryError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            FormEntryError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for FormEntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FormEntryError {}

impl From<ValidationError> for FormEntryError {
    fn from(err: ValidationError) -> Self {
        FormEntryError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for FormEntryError {
    fn from(err: DomainError) -> Self {
        match err.code.kind() {
            ErrorKind::Forbidden | ErrorKind::Unauthenticated => FormEntryError::Forbidden,
            ErrorKind::InvalidArgument => FormEntryError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => FormEntryError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_campaign_is_not_found() {
        assert_eq!(
            FormEntryError::campaign_not_found(CampaignId::new()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn store_failure_is_unavailable() {
        let err: FormEntryError = DomainError::database("insert failed").into();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }
}
