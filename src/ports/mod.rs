//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity and access
//!
//! - `CredentialValidator` - bearer credential to principal
//! - `AccessChecker` - membership existence checks
//!
//! ## Write side
//!
//! - `WorkspaceRepository`, `CampaignRepository`, `FormEntryRepository`
//!
//! ## Read side
//!
//! - `WorkspaceReader`, `CampaignReader`, `FormCatalogReader`,
//!   `FormEntryReader`, `SummaryReader`

mod access_checker;
mod campaign_reader;
mod campaign_repository;
mod credential_validator;
mod form_catalog_reader;
mod form_entry_reader;
mod form_entry_repository;
mod summary_reader;
mod workspace_reader;
mod workspace_repository;

pub use access_checker::AccessChecker;
pub use campaign_reader::{
    CampaignDetail, CampaignFormView, CampaignReader, CampaignSummaryView, CAMPAIGN_SORT_COLUMNS,
};
pub use campaign_repository::CampaignRepository;
pub use credential_validator::CredentialValidator;
pub use form_catalog_reader::{FormCatalogReader, FORM_TYPE_SORT_COLUMNS};
pub use form_entry_reader::{
    DetailView, EntryDetail, EntryView, FormEntryReader, ENTRY_SORT_COLUMNS,
    HISTORY_SORT_COLUMNS,
};
pub use form_entry_repository::FormEntryRepository;
pub use summary_reader::SummaryReader;
pub use workspace_reader::{
    MemberView, WorkspaceReader, WorkspaceView, MEMBER_SORT_COLUMNS, WORKSPACE_SORT_COLUMNS,
};
pub use workspace_repository::WorkspaceRepository;
