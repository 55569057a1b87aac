//! Error types for jobprobe
//!
//! Provides a single error enum with human-readable messages
//! that serializes as its display string for JSON reports.

use std::path::PathBuf;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all jobprobe operations
#[derive(Error, Debug)]
pub enum JobprobeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0} for {1}")]
    HttpStatus(u16, String),

    /// Page not found on server (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// CSS selector failed to parse
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Pagination regex failed to compile
    #[error("Invalid pagination pattern: {0}")]
    InvalidPattern(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No rule with the requested site name
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    /// Rules file could not be opened
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Filesystem error while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rules file is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Every rule was skipped, nothing was written
    #[error("No debug scripts were generated")]
    NoScriptsGenerated,
}

impl Serialize for JobprobeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for jobprobe operations
pub type Result<T> = std::result::Result<T, JobprobeError>;
