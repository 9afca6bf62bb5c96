//! Campaign command and query handlers.

mod create_campaign;
mod delete_campaign;
mod get_campaign;
mod get_campaign_forms;
mod list_campaigns;
mod preview_campaign;
mod update_campaign;

pub use create_campaign::{CreateCampaignCommand, CreateCampaignHandler};
pub use delete_campaign::{DeleteCampaignCommand, DeleteCampaignHandler};
pub use get_campaign::{GetCampaignHandler, GetCampaignQuery};
pub use get_campaign_forms::{
    GetCampaignFormsHandler, GetCampaignFormsQuery, GetFormAttributesHandler,
    GetFormAttributesQuery,
};
pub use list_campaigns::{ListCampaignsHandler, ListCampaignsQuery};
pub use preview_campaign::{PreviewCampaignHandler, PreviewCampaignQuery};
pub use update_campaign::{UpdateCampaignCommand, UpdateCampaignHandler, UpdateCampaignResult};
