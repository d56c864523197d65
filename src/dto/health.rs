use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Number of postings remembered so far; absent while storage is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seen_jobs: Option<u64>,
}

impl HealthResponse {
    /// The job store answered; report how many postings it holds.
    pub fn ok(seen_jobs: u64) -> Self {
        Self {
            status: "ok".to_string(),
            seen_jobs: Some(seen_jobs),
        }
    }

    /// The job store could not be reached.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            seen_jobs: None,
        }
    }
}
