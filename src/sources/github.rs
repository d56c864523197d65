use reqwest::Url;
use serde::Deserialize;
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use super::{
    JobSource, NOT_AVAILABLE, RawPosting, ScrapeError, SkillSet,
    age::{UNKNOWN_AGE_DAYS, days_since},
    endpoint_with_query,
};

const ENDPOINT: &str = "https://jobs.github.com/positions.json";
const LIMIT: usize = 20;
// `Wed Jun 03 12:00:00 UTC 2020` with the weekday and zone tokens removed.
const CREATED_AT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none] [hour]:[minute]:[second] [year]"
);

/// GitHub Jobs JSON positions API.
pub struct GithubJobs;

#[derive(Debug, Deserialize)]
struct GithubPosition {
    title: Option<String>,
    company: Option<String>,
    url: Option<String>,
    created_at: Option<String>,
    description: Option<String>,
}

fn age_of(created_at: &str, now: OffsetDateTime) -> i64 {
    let tokens: Vec<&str> = created_at.split_whitespace().collect();
    let [_weekday, month, day, clock, _zone, year] = tokens.as_slice() else {
        return UNKNOWN_AGE_DAYS;
    };
    let normalized = format!("{month} {day} {clock} {year}");

    PrimitiveDateTime::parse(&normalized, CREATED_AT)
        .map(|posted| days_since(posted.assume_utc(), now))
        .unwrap_or(UNKNOWN_AGE_DAYS)
}

impl JobSource for GithubJobs {
    fn name(&self) -> &'static str {
        "GitHub Jobs"
    }

    fn request_url(&self, skills: &SkillSet) -> Url {
        endpoint_with_query(
            ENDPOINT,
            [
                ("description", skills.keywords(3, " ")),
                ("full_time", "true".to_string()),
            ],
        )
    }

    fn parse(&self, body: &str, now: OffsetDateTime) -> Result<Vec<RawPosting>, ScrapeError> {
        let positions: Vec<GithubPosition> =
            serde_json::from_str(body).map_err(|source| ScrapeError::Json { source })?;

        Ok(positions
            .into_iter()
            .take(LIMIT)
            .map(|position| {
                let posted_date = position.created_at.unwrap_or_default();
                let search_text = format!(
                    "{} {} {}",
                    position.title.as_deref().unwrap_or_default(),
                    position.description.as_deref().unwrap_or_default(),
                    position.company.as_deref().unwrap_or_default()
                );
                RawPosting {
                    days_ago: age_of(&posted_date, now),
                    title: position.title.unwrap_or_else(|| NOT_AVAILABLE.into()),
                    company: position.company.unwrap_or_else(|| NOT_AVAILABLE.into()),
                    link: position.url.unwrap_or_default(),
                    posted_date,
                    search_text,
                }
            })
            .collect())
    }
}
