//! One pass over every portal: fetch, parse, filter, deduplicate, record, notify.

use std::time::SystemTime;

use futures::future::join_all;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::{
    dao::models::SeenJobEntity,
    dto::scan::{ScanReport, SourceReport},
    error::ServiceError,
    sources::{JobPosting, JobSource, RawPosting, SkillSet, fetch::FetchError},
    state::SharedState,
};

/// Keep the postings that mention at least one skill and, when `max_days_old` is set, are
/// recent enough.
pub fn select_postings(
    raw: Vec<RawPosting>,
    portal: &str,
    skills: &SkillSet,
    max_days_old: Option<i64>,
) -> Vec<JobPosting> {
    raw.into_iter()
        .filter(|posting| max_days_old.is_none_or(|max| posting.days_ago <= max))
        .filter(|posting| skills.matches(&posting.search_text))
        .map(|posting| posting.into_posting(portal))
        .collect()
}

/// Turn a fetch outcome into parsed postings, or the reason the portal yielded nothing.
fn extract(
    source: &dyn JobSource,
    fetched: Result<Option<String>, FetchError>,
    now: OffsetDateTime,
) -> Result<Vec<RawPosting>, String> {
    match fetched {
        Ok(Some(body)) => source.parse(&body, now).map_err(|err| {
            error!(source = source.name(), error = %err, "failed to parse portal response");
            err.to_string()
        }),
        Ok(None) => Ok(Vec::new()),
        Err(err) => {
            error!(source = source.name(), error = %err, "portal scrape failed");
            Err(err.to_string())
        }
    }
}

/// Record `posting` unless it was seen before; resolves to `true` for new postings.
async fn remember(state: &SharedState, posting: &JobPosting) -> Result<bool, ServiceError> {
    let entity = SeenJobEntity::from_posting(posting);
    let store = state.job_store();
    if store.is_seen(entity.job_id.clone()).await? {
        return Ok(false);
    }
    Ok(store.mark_seen(entity).await?)
}

async fn announce(state: &SharedState, fresh: Vec<JobPosting>) {
    let Some(notifier) = state.notifier() else {
        return;
    };

    for posting in fresh {
        let title = posting.title.clone();
        if let Err(err) = notifier.notify(posting).await {
            warn!(%title, error = %err, "failed to send job notification");
        }
    }
}

/// Filter and store each portal's postings in source order, appending newly stored ones to
/// `fresh` as soon as they are written.
async fn record_sources(
    state: &SharedState,
    responses: Vec<Result<Option<String>, FetchError>>,
    now: OffsetDateTime,
    report: &mut ScanReport,
    fresh: &mut Vec<JobPosting>,
) -> Result<(), ServiceError> {
    let config = state.config();

    for (source, fetched) in state.sources().iter().zip(responses) {
        let (postings, failure) = match extract(source.as_ref(), fetched, now) {
            Ok(raw) => (
                select_postings(
                    raw,
                    source.name(),
                    &config.skills,
                    source.filters_by_age().then_some(config.max_days_old),
                ),
                None,
            ),
            Err(reason) => (Vec::new(), Some(reason)),
        };

        let mut new = 0;
        for posting in &postings {
            if remember(state, posting).await? {
                new += 1;
                fresh.push(posting.clone());
            }
        }

        info!(source = source.name(), jobs = postings.len(), new, "portal scanned");
        report.sources.push(SourceReport {
            portal: source.name().to_owned(),
            found: postings.len(),
            new,
            error: failure,
        });
        report.postings.extend(postings);
    }

    Ok(())
}

/// Scan every configured portal.
///
/// Scans are serialised: a caller arriving while another scan runs waits for it to finish
/// and then performs its own. Portal failures only empty that portal's contribution;
/// storage failures abort the scan, after announcing whatever it already stored.
pub async fn run_scan(state: &SharedState) -> Result<ScanReport, ServiceError> {
    let _gate = state.scan_gate().lock().await;

    let started_at = SystemTime::now();
    let now = OffsetDateTime::from(started_at);
    let skills = &state.config().skills;

    let fetches = state.sources().iter().map(|source| {
        let url = source.request_url(skills);
        info!(source = source.name(), %url, "scraping portal");
        state.fetcher().fetch(url)
    });
    let responses = join_all(fetches).await;

    let mut report = ScanReport::new(started_at);
    let mut fresh = Vec::new();
    let recorded = record_sources(state, responses, now, &mut report, &mut fresh).await;

    // Stored postings are never seen as new again, so they are announced even on failure.
    let new = fresh.len();
    announce(state, fresh).await;
    recorded?;

    info!(jobs = report.postings.len(), new, "scan finished");
    Ok(report)
}
