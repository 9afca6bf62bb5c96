//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped by
//! module. Scoped handlers take the caller's [`Principal`] and authorize
//! through [`AccessGuard`](super::AccessGuard) first.
//!
//! [`Principal`]: crate::domain::foundation::Principal

pub mod campaign;
pub mod catalog;
pub mod form_entry;
pub mod reporting;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

/// Attempts at minting a fresh short key before giving up with a conflict.
pub(crate) const KEY_ATTEMPTS: usize = 3;

pub use campaign::{
    CreateCampaignCommand, CreateCampaignHandler, DeleteCampaignCommand, DeleteCampaignHandler,
    GetCampaignFormsHandler, GetCampaignFormsQuery, GetCampaignHandler, GetCampaignQuery,
    GetFormAttributesHandler, GetFormAttributesQuery, ListCampaignsHandler, ListCampaignsQuery,
    PreviewCampaignHandler, PreviewCampaignQuery, UpdateCampaignCommand, UpdateCampaignHandler,
    UpdateCampaignResult,
};
pub use catalog::{GetFormTypeHandler, GetFormTypeQuery, ListFormTypesHandler, ListFormTypesQuery};
pub use form_entry::{
    DeleteCampaignEntryCommand, DeleteCampaignEntryHandler, GetCampaignEntryHandler,
    GetCampaignEntryQuery, GetHistoryDetailHandler, GetHistoryDetailQuery, GetHistoryHandler,
    GetHistoryQuery, ListCampaignEntriesHandler, ListCampaignEntriesQuery, SubmitEntryCommand,
    SubmitEntryHandler,
};
pub use reporting::{
    CampaignDashboardHandler, CampaignDashboardQuery, DailyEntriesHandler, DailyEntriesQuery,
    WorkspaceSummaryHandler, WorkspaceSummaryQuery,
};
pub use workspace::{
    CreateWorkspaceCommand, CreateWorkspaceHandler, DeleteWorkspaceCommand,
    DeleteWorkspaceHandler, GetMemberHandler, GetMemberQuery, GetWorkspaceHandler,
    GetWorkspaceQuery, InviteMemberCommand, InviteMemberHandler, ListMembersHandler,
    ListMembersQuery, ListWorkspacesHandler, ListWorkspacesQuery, RemoveMemberCommand,
    RemoveMemberHandler, UpdateMemberStatusCommand, UpdateMemberStatusHandler,
    UpdateWorkspaceCommand, UpdateWorkspaceHandler,
};
