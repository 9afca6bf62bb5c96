//! Form-entry command and query handlers.

mod delete_campaign_entry;
mod get_campaign_entry;
mod get_history;
mod get_history_detail;
mod list_campaign_entries;
mod submit_entry;

pub use delete_campaign_entry::{DeleteCampaignEntryCommand, DeleteCampaignEntryHandler};
pub use get_campaign_entry::{GetCampaignEntryHandler, GetCampaignEntryQuery};
pub use get_history::{GetHistoryHandler, GetHistoryQuery};
pub use get_history_detail::{GetHistoryDetailHandler, GetHistoryDetailQuery};
pub use list_campaign_entries::{ListCampaignEntriesHandler, ListCampaignEntriesQuery};
pub use submit_entry::{SubmitEntryCommand, SubmitEntryHandler};
