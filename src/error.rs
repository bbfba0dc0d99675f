//! Error types for the mood tracker.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, MoodError>;

#[derive(Error, Debug)]
pub enum MoodError {
    /// Rejected at write time (empty name or mood)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A mood token that is not on the ordinal scale
    #[error("unknown mood category: {0}")]
    UnknownCategory(String),

    /// The backing file exists but is not valid JSON
    #[error("mood data is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
