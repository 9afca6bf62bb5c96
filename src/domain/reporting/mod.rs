//! Reporting module - read-only aggregates over campaigns and entries.
//!
//! `total_visitor` is an estimate derived from submissions, not a measured
//! visit count.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Estimated visitors per submission.
pub const VISITOR_MULTIPLIER: u64 = 3;

/// Days covered by the daily histogram.
pub const SUMMARY_WINDOW_DAYS: i64 = 60;

/// Submissions on one calendar day. Days without entries are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntryCount {
    pub date: NaiveDate,
    pub total: u64,
}

/// Headline numbers for one campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDashboard {
    pub total_visitor: u64,
    pub total_submit: u64,
}

impl CampaignDashboard {
    pub fn from_submissions(total_submit: u64) -> Self {
        Self {
            total_visitor: total_submit.saturating_mul(VISITOR_MULTIPLIER),
            total_submit,
        }
    }
}

/// Headline numbers for one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub total_campaign: u64,
    pub total_entry: u64,
}
