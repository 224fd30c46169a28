//! Error and validation types shared across the workspace.

use thiserror::Error;

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while building or validating a sampler configuration.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl SpecError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Common interface for error types across the workspace crates.
///
/// Implementors expose a stable string code for programmatic handling
/// alongside the human-readable `Display` message.
pub trait ComponentError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SPEC_001" or "GEOM_002". These codes
    /// are stable and can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    ///
    /// Returns a category like "spec", "geometry" or "synthesis".
    fn category(&self) -> &'static str;
}

impl ComponentError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidSampleRate { .. } => "SPEC_001",
            SpecError::InvalidDuration { .. } => "SPEC_002",
            SpecError::InvalidParameter { .. } => "SPEC_003",
            SpecError::JsonParse(_) => "SPEC_004",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}
