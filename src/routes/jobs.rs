use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        jobs::{JobsQuery, SeenJob},
        scan::ScanReport,
    },
    error::AppError,
    services::{jobs_service, scan_service},
    state::SharedState,
};

/// JSON routes over remembered postings and on-demand scans.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/scan", post(trigger_scan))
}

/// List remembered postings, newest first.
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(JobsQuery),
    security(("basic" = [])),
    responses(
        (status = 200, description = "Remembered postings", body = [SeenJob]),
        (status = 400, description = "Invalid limit"),
        (status = 401, description = "Missing or wrong credentials")
    )
)]
pub async fn list_jobs(
    State(state): State<SharedState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<Vec<SeenJob>>, AppError> {
    query.validate()?;
    Ok(Json(jobs_service::list_seen_jobs(&state, query.limit).await?))
}

/// Run a scan now and return its report.
#[utoipa::path(
    post,
    path = "/scan",
    tag = "jobs",
    security(("basic" = [])),
    responses(
        (status = 200, description = "Scan report", body = ScanReport),
        (status = 401, description = "Missing or wrong credentials")
    )
)]
pub async fn trigger_scan(State(state): State<SharedState>) -> Result<Json<ScanReport>, AppError> {
    Ok(Json(scan_service::run_scan(&state).await?))
}
