use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::sources::JobPosting;

/// Row of the `seen_jobs` table: a posting that has already been recorded and notified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeenJobEntity {
    /// MD5 fingerprint of title, company and link (see [`job_fingerprint`]).
    pub job_id: String,
    /// Posting title as scraped.
    pub title: String,
    /// Hiring company, or `N/A`.
    pub company: String,
    /// Link to the posting on its portal.
    pub url: String,
    /// Display name of the portal the posting came from.
    pub portal: String,
    /// Posting date as reported by the portal, or `Recently`.
    pub posted_date: String,
    /// Age of the posting when it was first seen.
    pub days_ago: i64,
    /// Database timestamp of the first sighting; `None` until persisted.
    pub notified_at: Option<String>,
}

impl SeenJobEntity {
    /// Build the row recorded for a freshly discovered posting.
    pub fn from_posting(posting: &JobPosting) -> Self {
        Self {
            job_id: job_fingerprint(&posting.title, &posting.company, &posting.link),
            title: posting.title.clone(),
            company: posting.company.clone(),
            url: posting.link.clone(),
            portal: posting.portal.clone(),
            posted_date: posting.posted_date.clone(),
            days_ago: posting.days_ago,
            notified_at: None,
        }
    }
}

/// Stable identifier of a posting: lowercase hex MD5 of `title`, `company` and `link`
/// concatenated without separators.
pub fn job_fingerprint(title: &str, company: &str, link: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(title.as_bytes());
    hasher.update(company.as_bytes());
    hasher.update(link.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_md5_of_concatenated_fields() {
        // md5("abc")
        assert_eq!(
            job_fingerprint("a", "b", "c"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn fingerprint_ignores_field_boundaries() {
        assert_eq!(job_fingerprint("ab", "", "c"), job_fingerprint("a", "bc", ""));
        assert_ne!(job_fingerprint("a", "b", "c"), job_fingerprint("a", "b", "d"));
    }

    #[test]
    fn entity_from_posting_copies_fields() {
        let posting = JobPosting {
            title: "Java Developer".into(),
            company: "Acme".into(),
            link: "https://example.com/1".into(),
            portal: "Remotive".into(),
            posted_date: "2024-05-01T10:00:00".into(),
            days_ago: 2,
        };

        let entity = SeenJobEntity::from_posting(&posting);
        assert_eq!(
            entity.job_id,
            job_fingerprint("Java Developer", "Acme", "https://example.com/1")
        );
        assert_eq!(entity.url, "https://example.com/1");
        assert_eq!(entity.portal, "Remotive");
        assert_eq!(entity.days_ago, 2);
        assert!(entity.notified_at.is_none());
    }
}
