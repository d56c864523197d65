use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    dao::job_store::JobStore,
    services::notifier::Notifier,
    sources::{JobSource, default_sources, fetch::PageFetcher},
};

/// Handle to [`AppState`] shared by handlers and background tasks.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration, storage and the portal scanners.
pub struct AppState {
    config: AppConfig,
    job_store: Arc<dyn JobStore>,
    fetcher: Arc<dyn PageFetcher>,
    sources: Vec<Arc<dyn JobSource>>,
    notifier: Option<Arc<dyn Notifier>>,
    scan_gate: Mutex<()>,
}

impl AppState {
    /// Assemble the state with every known portal and no notifier.
    pub fn new(
        config: AppConfig,
        job_store: Arc<dyn JobStore>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            config,
            job_store,
            fetcher,
            sources: default_sources(),
            notifier: None,
            scan_gate: Mutex::new(()),
        }
    }

    /// Replace the scanned portals.
    pub fn with_sources(mut self, sources: Vec<Arc<dyn JobSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// Announce new postings through `notifier`.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Wrap the state in an [`Arc`] so it can be cloned cheaply.
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store of seen postings.
    pub fn job_store(&self) -> &Arc<dyn JobStore> {
        &self.job_store
    }

    /// Downloader used for every portal.
    pub fn fetcher(&self) -> &Arc<dyn PageFetcher> {
        &self.fetcher
    }

    /// Portals in scan order.
    pub fn sources(&self) -> &[Arc<dyn JobSource>] {
        &self.sources
    }

    /// Notifier for new postings, when configured.
    pub fn notifier(&self) -> Option<&Arc<dyn Notifier>> {
        self.notifier.as_ref()
    }

    /// Held for the whole duration of a scan so scans never overlap.
    pub fn scan_gate(&self) -> &Mutex<()> {
        &self.scan_gate
    }
}
