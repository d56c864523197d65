/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read access to remembered postings.
pub mod jobs_service;
/// Chat notifications for new postings.
pub mod notifier;
/// Portal scanning, filtering and deduplication.
pub mod scan_service;
/// Periodic background scans.
pub mod scheduler;
