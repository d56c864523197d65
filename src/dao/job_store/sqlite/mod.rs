mod config;
mod error;
mod store;

pub use config::SqliteConfig;
pub use error::{SqliteDaoError, SqliteResult};
pub use store::SqliteJobStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        match err {
            SqliteDaoError::Query { operation, .. } => StorageError::unavailable(operation, err),
            _ => StorageError::setup(err),
        }
    }
}
