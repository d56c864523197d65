use tokio::time::sleep;
use tracing::{error, info};

use crate::{services::scan_service, state::SharedState};

/// Scan all portals forever, pausing `CHECK_INTERVAL` between two scans.
pub async fn run(state: SharedState) {
    let interval = state.config().check_interval;
    info!(
        interval_secs = interval.as_secs(),
        immediate = state.config().scan_on_startup,
        "starting scan scheduler"
    );

    if !state.config().scan_on_startup {
        sleep(interval).await;
    }

    loop {
        match scan_service::run_scan(&state).await {
            Ok(report) => info!(
                jobs = report.postings.len(),
                new = report.new_count(),
                "scheduled scan complete"
            ),
            Err(err) => error!(error = %err, "scheduled scan failed"),
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use futures::future::BoxFuture;
    use reqwest::Url;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{job_store::JobStore, models::SeenJobEntity, storage::StorageResult},
        sources::fetch::{FetchError, PageFetcher},
        state::AppState,
    };

    /// Counts requests; every portal answers without content.
    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl PageFetcher for CountingFetcher {
        fn fetch(&self, _url: Url) -> BoxFuture<'static, Result<Option<String>, FetchError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(None) })
        }
    }

    /// Store that never holds anything; scans here never reach it.
    struct EmptyStore;

    impl JobStore for EmptyStore {
        fn is_seen(&self, _job_id: String) -> BoxFuture<'static, StorageResult<bool>> {
            Box::pin(async { Ok(false) })
        }

        fn mark_seen(&self, _job: SeenJobEntity) -> BoxFuture<'static, StorageResult<bool>> {
            Box::pin(async { Ok(true) })
        }

        fn list_recent(&self, _limit: u32) -> BoxFuture<'static, StorageResult<Vec<SeenJobEntity>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn count(&self) -> BoxFuture<'static, StorageResult<u64>> {
            Box::pin(async { Ok(0) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn spawn_scheduler(scan_on_startup: &'static str) -> Arc<CountingFetcher> {
        let config = AppConfig::from_lookup(|key| match key {
            "CHECK_INTERVAL" => Some("60".into()),
            "SCAN_ON_STARTUP" => Some(scan_on_startup.into()),
            _ => None,
        });
        let fetcher = Arc::new(CountingFetcher::default());
        let state = AppState::new(config, Arc::new(EmptyStore), fetcher.clone()).shared();
        tokio::spawn(run(state));
        fetcher
    }

    fn scans(fetcher: &CountingFetcher) -> usize {
        fetcher.calls.load(Ordering::SeqCst) / crate::sources::default_sources().len()
    }

    #[tokio::test(start_paused = true)]
    async fn scans_immediately_then_every_interval() {
        let fetcher = spawn_scheduler("true");

        sleep(Duration::from_secs(1)).await;
        assert_eq!(scans(&fetcher), 1);

        sleep(Duration::from_secs(60)).await;
        assert_eq!(scans(&fetcher), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_one_interval_when_startup_scan_is_disabled() {
        let fetcher = spawn_scheduler("false");

        sleep(Duration::from_secs(1)).await;
        assert_eq!(scans(&fetcher), 0);

        sleep(Duration::from_secs(60)).await;
        assert_eq!(scans(&fetcher), 1);
    }
}
