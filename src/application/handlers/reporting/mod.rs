//! Reporting query handlers.

mod campaign_dashboard;
mod daily_entries;
mod workspace_summary;

pub use campaign_dashboard::{CampaignDashboardHandler, CampaignDashboardQuery};
pub use daily_entries::{DailyEntriesHandler, DailyEntriesQuery};
pub use workspace_summary::{WorkspaceSummaryHandler, WorkspaceSummaryQuery};
