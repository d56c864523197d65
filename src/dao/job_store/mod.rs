/// SQLite-backed implementation.
pub mod sqlite;

use crate::dao::models::SeenJobEntity;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer remembering which postings were already seen.
pub trait JobStore: Send + Sync {
    /// Whether a posting with `job_id` was recorded before.
    fn is_seen(&self, job_id: String) -> BoxFuture<'static, StorageResult<bool>>;
    /// Record a posting; resolves to `false` when the id was already present.
    fn mark_seen(&self, job: SeenJobEntity) -> BoxFuture<'static, StorageResult<bool>>;
    /// Up to `limit` recorded postings, newest first.
    fn list_recent(&self, limit: u32) -> BoxFuture<'static, StorageResult<Vec<SeenJobEntity>>>;
    /// Number of recorded postings.
    fn count(&self) -> BoxFuture<'static, StorageResult<u64>>;
    /// Cheap round trip proving the backend answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
