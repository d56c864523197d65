use std::{fs, str::FromStr};

use futures::future::BoxFuture;
use sqlx::{
    FromRow,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use tracing::debug;

use crate::dao::{job_store::JobStore, models::SeenJobEntity, storage::StorageResult};

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
};

const CREATE_SEEN_JOBS: &str = "
    CREATE TABLE IF NOT EXISTS seen_jobs (
        job_id TEXT PRIMARY KEY,
        title TEXT,
        company TEXT,
        url TEXT,
        portal TEXT,
        posted_date TEXT,
        days_ago INTEGER,
        notified_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

#[derive(Clone)]
/// [`JobStore`] over a pooled SQLite database.
pub struct SqliteJobStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct SeenJobRow {
    job_id: String,
    title: String,
    company: String,
    url: String,
    portal: String,
    posted_date: String,
    days_ago: i64,
    notified_at: Option<String>,
}

impl From<SeenJobRow> for SeenJobEntity {
    fn from(row: SeenJobRow) -> Self {
        Self {
            job_id: row.job_id,
            title: row.title,
            company: row.company,
            url: row.url,
            portal: row.portal,
            posted_date: row.posted_date,
            days_ago: row.days_ago,
            notified_at: row.notified_at,
        }
    }
}

impl SqliteJobStore {
    /// Open (creating if needed) the database file and ensure the schema exists.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|source| SqliteDaoError::InvalidUrl {
                url: config.url.clone(),
                source,
            })?
            .create_if_missing(true);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| SqliteDaoError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.url.contains(":memory:") {
            // The database lives and dies with its only connection.
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|source| SqliteDaoError::Connect { source })?;

        let store = Self { pool };
        store.ensure_schema().await?;
        debug!(url = %config.url, "SQLite job store ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> SqliteResult<()> {
        sqlx::query(CREATE_SEEN_JOBS)
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::Schema { source })?;
        Ok(())
    }

    async fn is_seen_inner(&self, job_id: &str) -> SqliteResult<bool> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT job_id FROM seen_jobs WHERE job_id = ?")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|source| SqliteDaoError::Query {
                    operation: "seen lookup",
                    source,
                })?;
        Ok(found.is_some())
    }

    async fn mark_seen_inner(&self, job: &SeenJobEntity) -> SqliteResult<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO seen_jobs \
             (job_id, title, company, url, portal, posted_date, days_ago) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&job.job_id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.url)
        .bind(&job.portal)
        .bind(&job.posted_date)
        .bind(job.days_ago)
        .execute(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::Query {
            operation: "insert",
            source,
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_recent_inner(&self, limit: u32) -> SqliteResult<Vec<SeenJobEntity>> {
        // CAST keeps the column typed as TEXT instead of the declared TIMESTAMP.
        let rows = sqlx::query_as::<_, SeenJobRow>(
            "SELECT job_id, title, company, url, portal, posted_date, days_ago, \
             CAST(notified_at AS TEXT) AS notified_at \
             FROM seen_jobs ORDER BY notified_at DESC, job_id ASC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::Query {
            operation: "list",
            source,
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_inner(&self) -> SqliteResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seen_jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::Query {
                operation: "count",
                source,
            })?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> SqliteResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::Query {
                operation: "ping",
                source,
            })?;
        Ok(())
    }
}

impl JobStore for SqliteJobStore {
    fn is_seen(&self, job_id: String) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.is_seen_inner(&job_id).await.map_err(Into::into) })
    }

    fn mark_seen(&self, job: SeenJobEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.mark_seen_inner(&job).await.map_err(Into::into) })
    }

    fn list_recent(&self, limit: u32) -> BoxFuture<'static, StorageResult<Vec<SeenJobEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_recent_inner(limit).await.map_err(Into::into) })
    }

    fn count(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_inner().await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
