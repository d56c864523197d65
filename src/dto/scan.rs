use std::time::SystemTime;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::format_system_time, sources::JobPosting};

/// Outcome of one portal during a scan.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SourceReport {
    /// Portal display name.
    pub portal: String,
    /// Postings that passed the age and skill filters.
    pub found: usize,
    /// Postings not seen before this scan.
    pub new: usize,
    /// Why the portal yielded nothing, when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a scan over every portal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScanReport {
    /// RFC 3339 timestamp of the scan start.
    pub started_at: String,
    /// Every filtered posting, new or previously seen, in portal order.
    pub postings: Vec<JobPosting>,
    /// One entry per portal, in scan order.
    pub sources: Vec<SourceReport>,
}

impl ScanReport {
    /// Empty report for a scan started at `started_at`.
    pub fn new(started_at: SystemTime) -> Self {
        Self {
            started_at: format_system_time(started_at),
            postings: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Postings stored for the first time during this scan.
    pub fn new_count(&self) -> usize {
        self.sources.iter().map(|source| source.new).sum()
    }
}
