/// Connection string used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/jobs.db";

/// Runtime configuration describing how to open the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// sqlx connection string, e.g. `sqlite://data/jobs.db`.
    pub url: String,
    /// Upper bound of the connection pool.
    pub max_connections: u32,
}

impl SqliteConfig {
    /// Construct a configuration for the given sqlx connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
        }
    }

    /// Private in-memory database, mostly useful for tests.
    ///
    /// Each SQLite connection owns its own in-memory database, so the pool is pinned
    /// to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}
