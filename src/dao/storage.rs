use std::error::Error;
use thiserror::Error;

/// Result alias for job store operations.
pub type StorageResult<T> = Result<T, StorageError>;

type BoxedSource = Box<dyn Error + Send + Sync>;

/// Backend-agnostic failure of the seen-jobs store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be opened or its schema prepared.
    #[error("job store setup failed: {message}")]
    Setup {
        message: String,
        #[source]
        source: BoxedSource,
    },
    /// A read or write against an opened store failed.
    #[error("job store unavailable during {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
        #[source]
        source: BoxedSource,
    },
}

impl StorageError {
    /// Wrap a failure raised while opening the store.
    pub fn setup(source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Setup {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a failure of `operation` on an opened store.
    pub fn unavailable(operation: &'static str, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            operation,
            message: source.to_string(),
            source: Box::new(source),
        }
    }
}
