//! Library crate for job-scout, exposing modules for binaries and tests.

/// Environment configuration.
pub mod config;
/// Persistence of seen postings.
pub mod dao;
/// Response payloads and the HTML dashboard.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP routes.
pub mod routes;
/// Scanning, notification and scheduling.
pub mod services;
/// Job portals and their parsers.
pub mod sources;
/// Shared application state.
pub mod state;
