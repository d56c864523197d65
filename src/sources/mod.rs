//! Job portals the scanner reads, and the shared types their parsers produce.
//!
//! A [`JobSource`] only knows how to build its request URL and how to turn a response
//! body into [`RawPosting`]s. Fetching, filtering and deduplication live in the scan
//! service so every portal is treated the same way.

/// Posting age parsing.
pub mod age;
mod boards;
mod cards;
/// Page downloads.
pub mod fetch;
mod github;
mod remotive;
/// Configured skill list.
pub mod skills;
mod weworkremotely;

use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;

pub use self::skills::SkillSet;

/// Placeholder used when a portal does not expose a field.
pub const NOT_AVAILABLE: &str = "N/A";
/// Posted date reported by portals whose listing pages carry no usable date.
pub const RECENTLY: &str = "Recently";

/// A posting that passed the age and skill filters of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct JobPosting {
    /// Posting title.
    pub title: String,
    /// Hiring company, or `N/A`.
    pub company: String,
    /// Link to the posting.
    pub link: String,
    /// Display name of the portal.
    pub portal: String,
    /// Posting date as the portal reported it, or `Recently`.
    pub posted_date: String,
    /// Age in whole days; `999` when unknown.
    pub days_ago: i64,
}

/// Parser output before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPosting {
    /// Posting title.
    pub title: String,
    /// Hiring company, or `N/A`.
    pub company: String,
    /// Link to the posting.
    pub link: String,
    /// Posting date as the portal reported it, or `Recently`.
    pub posted_date: String,
    /// Age in whole days; `999` when unknown.
    pub days_ago: i64,
    /// Text the skill filter runs against; differs per portal.
    pub search_text: String,
}

impl RawPosting {
    /// Attach the portal name, dropping the search text.
    pub fn into_posting(self, portal: &str) -> JobPosting {
        JobPosting {
            title: self.title,
            company: self.company,
            link: self.link,
            portal: portal.to_owned(),
            posted_date: self.posted_date,
            days_ago: self.days_ago,
        }
    }
}

/// Failures while turning a portal response into postings.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to decode JSON payload")]
    /// The JSON body did not match the expected shape.
    Json {
        #[source]
        source: serde_json::Error,
    },
    /// The RSS feed could not be read.
    #[error("malformed XML feed: {0}")]
    Xml(String),
    /// A built-in selector failed to parse.
    #[error("invalid CSS selector `{selector}`: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}

/// A single job portal.
pub trait JobSource: Send + Sync {
    /// Display name, also stored as the posting's portal.
    fn name(&self) -> &'static str;

    /// Whether postings older than `MAX_DAYS_OLD` are dropped. Only portals that publish a
    /// real posting date are filtered.
    fn filters_by_age(&self) -> bool {
        true
    }

    /// Search URL for the configured skills.
    fn request_url(&self, skills: &SkillSet) -> Url;

    /// Parse a successful response body. `now` anchors age computations.
    fn parse(&self, body: &str, now: OffsetDateTime) -> Result<Vec<RawPosting>, ScrapeError>;
}

/// Every portal the scanner knows about, in scan order.
pub fn default_sources() -> Vec<Arc<dyn JobSource>> {
    vec![
        Arc::new(remotive::Remotive),
        Arc::new(boards::LINKEDIN),
        Arc::new(boards::GLASSDOOR),
        Arc::new(github::GithubJobs),
        Arc::new(boards::ANGELLIST),
        Arc::new(boards::MONSTER),
        Arc::new(boards::DICE),
        Arc::new(boards::FLEXJOBS),
        Arc::new(weworkremotely::WeWorkRemotely),
    ]
}

/// Build a URL from a constant endpoint plus form-encoded query pairs.
fn endpoint_with_query<'a, I>(endpoint: &str, pairs: I) -> Url
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut url = Url::parse(endpoint).expect("portal endpoints are valid URLs");
    let pairs: Vec<_> = pairs.into_iter().collect();
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
    }
    url
}
