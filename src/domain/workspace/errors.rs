//! Workspace-specific error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, ErrorKind, MemberId, UserId, ValidationError, WorkspaceId,
};

/// Workspace and membership errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// Workspace was not found or is deleted.
    NotFound(WorkspaceId),
    /// Membership row was not found or is deleted.
    MemberNotFound(MemberId),
    /// User already has an active membership in this workspace.
    AlreadyMember(UserId),
    /// Storage-level uniqueness violation.
    Conflict(String),
    /// Caller lacks rights on the workspace.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl WorkspaceError {
    pub fn not_found(id: WorkspaceId) -> Self {
        WorkspaceError::NotFound(id)
    }
    pub fn member_not_found(id: MemberId) -> Self {
        WorkspaceError::MemberNotFound(id)
    }
    pub fn already_member(user_id: UserId) -> Self {
        WorkspaceError::AlreadyMember(user_id)
    }
    pub fn forbidden() -> Self {
        WorkspaceError::Forbidden
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        WorkspaceError::Conflict(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WorkspaceError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        WorkspaceError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkspaceError::NotFound(_) => ErrorCode::WorkspaceNotFound,
            WorkspaceError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            WorkspaceError::AlreadyMember(_) => ErrorCode::AlreadyMember,
            WorkspaceError::Conflict(_) => ErrorCode::DuplicateKey,
            WorkspaceError::Forbidden => ErrorCode::Forbidden,
            WorkspaceError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            WorkspaceError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
    pub fn message(&self) -> String {
        match self {
            WorkspaceError::NotFound(id) => format!("Workspace not found: {}", id),
            WorkspaceError::MemberNotFound(id) => format!("Member not found: {}", id),
            WorkspaceError::AlreadyMember(_) => {
                "this user already exists in this workspace".to_string()
            }
            WorkspaceError::Conflict(msg) => msg.clone(),
            WorkspaceError::Forbidden => "Permission denied".to_string(),
            WorkspaceError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            WorkspaceError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WorkspaceError {}

impl From<ValidationError> for WorkspaceError {
    fn from(err: ValidationError) -> Self {
        WorkspaceError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for WorkspaceError {
    fn from(err: DomainError) -> Self {
        match err.code.kind() {
            ErrorKind::Forbidden | ErrorKind::Unauthenticated => WorkspaceError::Forbidden,
            ErrorKind::Conflict => WorkspaceError::Conflict(err.message),
            ErrorKind::InvalidArgument => WorkspaceError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => WorkspaceError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_member_is_conflict() {
        let err = WorkspaceError::already_member(UserId::new("u1").unwrap());
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "this user already exists in this workspace");
    }

    #[test]
    fn forbidden_domain_error_maps_to_forbidden() {
        let err: WorkspaceError = DomainError::new(ErrorCode::Forbidden, "no").into();
        assert_eq!(err, WorkspaceError::Forbidden);
    }

    #[test]
    fn database_error_maps_to_unavailable() {
        let err: WorkspaceError = DomainError::database("connection reset").into();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: WorkspaceError = ValidationError::empty_field("title").into();
        assert!(matches!(err, WorkspaceError::ValidationFailed { ref field, .. } if field == "title"));
    }
}
