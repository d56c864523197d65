use crate::{dto::jobs::SeenJob, error::ServiceError, state::SharedState};

/// Most recently recorded postings, newest first.
pub async fn list_seen_jobs(state: &SharedState, limit: u32) -> Result<Vec<SeenJob>, ServiceError> {
    let entities = state.job_store().list_recent(limit).await?;
    Ok(entities.into_iter().map(Into::into).collect())
}
