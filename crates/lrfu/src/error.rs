//! Error types for the LRFU engine
//!
//! The engine itself has no fallible operations once constructed: misses and
//! absent keys are reported through `Option`/`bool`. Errors only arise from
//! configuration that cannot produce well-defined decay behavior.

use thiserror::Error;

/// Result alias used throughout the crate
pub type LrfuResult<T> = Result<T, LrfuError>;

/// Errors raised while building or loading an engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LrfuError {
    /// A configuration field holds a value the engine cannot operate with
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfiguration {
        /// Name of the offending field
        field: String,
        /// Human readable reason
        message: String,
    },

    /// A configuration document could not be parsed
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Document format (e.g. `TOML`)
        format: String,
        /// Parser diagnostic
        message: String,
    },
}

impl LrfuError {
    /// Create an invalid configuration error for a specific field
    pub fn invalid_config<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidConfiguration { field: field.into(), message: message.into() }
    }

    /// Create a parse error for the given document format
    pub fn parse<F: Into<String>, M: Into<String>>(format: F, message: M) -> Self {
        Self::Parse { format: format.into(), message: message.into() }
    }

    /// Returns `true` if repeating the failed call could succeed.
    ///
    /// Every variant is a caller contract violation, so this is always
    /// `false`.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// Returns the name of the field involved, when known.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { field, .. } => Some(field),
            Self::Parse { .. } => None,
        }
    }
}
