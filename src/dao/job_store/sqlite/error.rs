//! Error types shared by the SQLite storage implementation.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with SQLite.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// The connection string could not be parsed.
    #[error("invalid SQLite connection string `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    /// The directory holding the database file could not be created.
    #[error("failed to create database directory `{}`", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the connection pool failed.
    #[error("failed to open SQLite database")]
    Connect {
        #[source]
        source: sqlx::Error,
    },
    /// Creating the `seen_jobs` table failed.
    #[error("failed to prepare SQLite schema")]
    Schema {
        #[source]
        source: sqlx::Error,
    },
    /// A statement against `seen_jobs` failed.
    #[error("SQLite {operation} failed")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}
