//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, pagination and error types
//! that form the vocabulary of the Kiraform domain.

mod auth;
mod errors;
mod ids;
mod naming;
mod pagination;
mod timestamp;

pub use auth::{AuthError, Principal, ADMIN_ROLE};
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{
    CampaignFormAttributeId, CampaignFormId, CampaignId, FormDetailEntryId, FormEntryId,
    FormTypeId, MemberId, ProductId, UserId, WorkspaceId,
};
pub use naming::{initials, required_text, short_key, slugify};
pub use pagination::{
    total_pages, Page, PageRequest, QueryParams, SortDirection, SortOrder, DEFAULT_LIMIT,
    DEFAULT_PAGE, MAX_LIMIT,
};
pub use timestamp::Timestamp;
