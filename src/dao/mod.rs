/// Seen-job persistence and lookup operations.
pub mod job_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
