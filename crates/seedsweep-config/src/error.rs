//! Error types for configuration loading and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was absent from every configuration source.
    #[error("missing configuration field")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
    /// Field carried a value that failed validation or parsing.
    #[error("invalid configuration field")]
    InvalidField {
        /// Field that failed validation.
        field: String,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Configuration file could not be read.
    #[error("configuration file unreadable")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// File the operation touched.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// Configuration file was not valid JSON.
    #[error("configuration file malformed")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Source JSON error.
        source: serde_json::Error,
    },
    /// Media extension allow-list could not be compiled into a pattern.
    #[error("media extension pattern invalid")]
    Pattern {
        /// Pattern text that failed to compile.
        pattern: String,
        /// Source pattern error.
        source: regex::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
