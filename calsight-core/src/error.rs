//! Error types for calsight.

use thiserror::Error;

/// Errors that can occur in calsight operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Requested duration of {minutes} minutes is outside the allowed range {min}-{max}")]
    InvalidDuration { minutes: u32, min: u32, max: u32 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Event source error: {0}")]
    EventSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnalysisError {
    /// True for errors caused by the caller's request rather than by calsight or its sources.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidDuration { .. } | AnalysisError::InvalidDate(_)
        )
    }
}

/// Result type alias for calsight operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
