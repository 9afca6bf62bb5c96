//! PostgreSQL adapters - sqlx implementations of the persistence ports.
//!
//! - `PostgresAccessChecker` - membership existence checks
//! - `PostgresWorkspaceRepository` / `PostgresWorkspaceReader`
//! - `PostgresCampaignRepository` / `PostgresCampaignReader`
//! - `PostgresFormCatalogReader` - seeded field types
//! - `PostgresFormEntryRepository` / `PostgresFormEntryReader`
//! - `PostgresSummaryReader` - reporting aggregates
//!
//! Multi-row writes run inside one transaction each.

mod access_checker;
mod campaign_reader;
mod campaign_repository;
mod form_catalog_reader;
mod form_entry_reader;
mod form_entry_repository;
mod helpers;
mod summary_reader;
mod workspace_reader;
mod workspace_repository;

pub use access_checker::PostgresAccessChecker;
pub use campaign_reader::PostgresCampaignReader;
pub use campaign_repository::PostgresCampaignRepository;
pub use form_catalog_reader::PostgresFormCatalogReader;
pub use form_entry_reader::PostgresFormEntryReader;
pub use form_entry_repository::PostgresFormEntryRepository;
pub use summary_reader::PostgresSummaryReader;
pub use workspace_reader::PostgresWorkspaceReader;
pub use workspace_repository::PostgresWorkspaceRepository;
