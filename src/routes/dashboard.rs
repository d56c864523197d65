use axum::{Router, extract::State, response::Html, routing::get};

use crate::{
    dto::dashboard::render_dashboard, error::AppError, services::scan_service,
    state::SharedState,
};

/// HTML dashboard subtree.
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(dashboard))
}

/// Scan every portal and render the matching postings as an HTML table.
#[utoipa::path(
    get,
    path = "/",
    tag = "dashboard",
    security(("basic" = [])),
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String),
        (status = 401, description = "Missing or wrong credentials"),
        (status = 500, description = "Dashboard could not be rendered")
    )
)]
pub async fn dashboard(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let report = scan_service::run_scan(&state).await?;
    let page = render_dashboard(&report)
        .map_err(|err| AppError::Internal(format!("failed to render dashboard: {err}")))?;
    Ok(Html(page))
}
