use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dao::models::SeenJobEntity;

/// Default page size of `/jobs`.
pub const DEFAULT_LIMIT: u32 = 50;

/// Query string accepted by `/jobs`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct JobsQuery {
    /// Maximum number of postings returned (1-500, default 50).
    #[validate(range(min = 1, max = 500))]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// A remembered posting as exposed by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeenJob {
    /// Fingerprint identifying the posting.
    pub job_id: String,
    /// Posting title.
    pub title: String,
    /// Hiring company, or `N/A`.
    pub company: String,
    /// Link to the posting.
    pub url: String,
    /// Portal the posting was found on.
    pub portal: String,
    /// Posting date as the portal reported it.
    pub posted_date: String,
    /// Age in days when first seen.
    pub days_ago: i64,
    /// When the posting was first seen (SQLite `CURRENT_TIMESTAMP`, UTC).
    pub notified_at: Option<String>,
}

impl From<SeenJobEntity> for SeenJob {
    fn from(entity: SeenJobEntity) -> Self {
        Self {
            job_id: entity.job_id,
            title: entity.title,
            company: entity.company,
            url: entity.url,
            portal: entity.portal,
            posted_date: entity.posted_date,
            days_ago: entity.days_ago,
            notified_at: entity.notified_at,
        }
    }
}
