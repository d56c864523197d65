use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// HTML dashboard rendering.
pub mod dashboard;
/// Health check payloads.
pub mod health;
/// Remembered posting payloads.
pub mod jobs;
/// Scan report payloads.
pub mod scan;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
