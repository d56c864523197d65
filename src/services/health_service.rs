use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report `ok` with the stored posting count, or `degraded` when storage does not answer.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let store = state.job_store();

    if let Err(err) = store.health_check().await {
        warn!(error = %err, "storage health check failed");
        return HealthResponse::degraded();
    }

    match store.count().await {
        Ok(count) => HealthResponse::ok(count),
        Err(err) => {
            warn!(error = %err, "failed to count seen jobs");
            HealthResponse::degraded()
        }
    }
}
