use reqwest::Url;
use serde::Deserialize;
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use super::{
    JobSource, NOT_AVAILABLE, RawPosting, ScrapeError, SkillSet,
    age::{UNKNOWN_AGE_DAYS, days_since},
};

const ENDPOINT: &str = "https://remotive.com/api/remote-jobs?limit=50";
const PUBLICATION_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Remotive's public remote-jobs API.
pub struct Remotive;

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    title: Option<String>,
    company_name: Option<String>,
    url: Option<String>,
    publication_date: Option<String>,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

fn age_of(publication_date: &str, now: OffsetDateTime) -> i64 {
    PrimitiveDateTime::parse(publication_date, PUBLICATION_DATE)
        .map(|posted| days_since(posted.assume_utc(), now))
        .unwrap_or(UNKNOWN_AGE_DAYS)
}

impl JobSource for Remotive {
    fn name(&self) -> &'static str {
        "Remotive"
    }

    fn request_url(&self, _skills: &SkillSet) -> Url {
        Url::parse(ENDPOINT).expect("portal endpoints are valid URLs")
    }

    fn parse(&self, body: &str, now: OffsetDateTime) -> Result<Vec<RawPosting>, ScrapeError> {
        let response: RemotiveResponse =
            serde_json::from_str(body).map_err(|source| ScrapeError::Json { source })?;

        Ok(response
            .jobs
            .into_iter()
            .map(|job| {
                let posted_date = job.publication_date.unwrap_or_default();
                let search_text = format!(
                    "{} {} {}",
                    job.title.as_deref().unwrap_or_default(),
                    job.description.as_deref().unwrap_or_default(),
                    job.tags.join(" ")
                );
                RawPosting {
                    days_ago: age_of(&posted_date, now),
                    title: job.title.unwrap_or_else(|| NOT_AVAILABLE.into()),
                    company: job.company_name.unwrap_or_else(|| NOT_AVAILABLE.into()),
                    link: job.url.unwrap_or_default(),
                    posted_date,
                    search_text,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const NOW: OffsetDateTime = datetime!(2024-05-10 12:00 UTC);

    #[test]
    fn parses_jobs_and_ages() {
        let body = r#"{
            "job-count": 2,
            "jobs": [
                {
                    "title": "Senior Java Engineer",
                    "company_name": "Acme",
                    "url": "https://remotive.com/remote-jobs/1",
                    "publication_date": "2024-05-07T09:30:00",
                    "description": "<p>Spring Boot microservices</p>",
                    "tags": ["java", "kafka"]
                },
                {
                    "publication_date": "yesterday-ish"
                }
            ]
        }"#;

        let postings = Remotive.parse(body, NOW).unwrap();
        assert_eq!(postings.len(), 2);

        let first = &postings[0];
        assert_eq!(first.title, "Senior Java Engineer");
        assert_eq!(first.company, "Acme");
        assert_eq!(first.days_ago, 3);
        assert_eq!(first.posted_date, "2024-05-07T09:30:00");
        assert!(first.search_text.contains("Spring Boot"));
        assert!(first.search_text.ends_with("java kafka"));

        let second = &postings[1];
        assert_eq!(second.title, "N/A");
        assert_eq!(second.company, "N/A");
        assert_eq!(second.link, "");
        assert_eq!(second.days_ago, UNKNOWN_AGE_DAYS);
    }

    #[test]
    fn missing_jobs_key_is_empty() {
        assert!(Remotive.parse("{}", NOW).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            Remotive.parse("<html>", NOW),
            Err(ScrapeError::Json { .. })
        ));
    }

    #[test]
    fn url_is_fixed() {
        assert_eq!(
            Remotive.request_url(&SkillSet::parse("rust")).as_str(),
            ENDPOINT
        );
    }
}
