//! # Design
//!
//! - Constant-message errors with context fields for every remote-console failure.
//! - Parse failures carry one reason per missing or malformed report field, so
//!   the first gap in a report determines the error a caller observes.
//! - Source errors are preserved unflattened for logging at the outermost layer.

use std::io;

use thiserror::Error;

/// Result type for remote-console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Result type for report parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors produced while driving the daemon's remote-control tool.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The external command could not be spawned.
    #[error("remote command could not be spawned")]
    Spawn {
        /// Full command line that failed to start.
        command: String,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The external command exited with a non-zero status.
    #[error("remote command exited with failure")]
    Exit {
        /// Full command line that failed.
        command: String,
        /// Process exit code when the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error output.
        stderr: String,
    },
    /// The external command exceeded the execution deadline.
    #[error("remote command timed out")]
    Timeout {
        /// Full command line that overran.
        command: String,
        /// Deadline in milliseconds.
        limit_ms: u64,
    },
    /// The daemon did not acknowledge a stop command.
    #[error("torrent stop rejected by daemon")]
    StopRejected {
        /// Torrent identifier.
        id: i64,
        /// Torrent display name.
        name: String,
        /// Response text that lacked the success marker.
        output: String,
    },
    /// The daemon did not acknowledge a remove command.
    #[error("torrent remove rejected by daemon")]
    RemoveRejected {
        /// Torrent identifier.
        id: i64,
        /// Torrent display name.
        name: String,
        /// Response text that lacked the success marker.
        output: String,
    },
    /// The daemon did not acknowledge a remove-and-delete command.
    #[error("torrent remove-and-delete rejected by daemon")]
    RemoveAndDeleteRejected {
        /// Torrent identifier.
        id: i64,
        /// Torrent display name.
        name: String,
        /// Response text that lacked the success marker.
        output: String,
    },
    /// A detail report could not be parsed into a record.
    #[error("torrent report parse failed")]
    Parse {
        /// Underlying parse error.
        source: ParseError,
    },
}

impl From<ParseError> for ConsoleError {
    fn from(source: ParseError) -> Self {
        Self::Parse { source }
    }
}

/// Errors produced while extracting fields from a detail report.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The report text was empty or blank.
    #[error("torrent report was empty")]
    EmptyReport {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `Name` field was absent.
    #[error("torrent name missing from report")]
    NameMissing {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `State` field was absent.
    #[error("torrent state missing from report")]
    StateMissing {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `Location` field was absent.
    #[error("torrent location missing from report")]
    LocationMissing {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `Percent Done` field was absent.
    #[error("torrent completion percent missing from report")]
    PercentMissing {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `Ratio` field was absent.
    #[error("torrent ratio missing from report")]
    RatioMissing {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `Date finished` field was absent.
    #[error("torrent finish date missing from report")]
    DateMissing {
        /// Torrent identifier the report was fetched for.
        id: i64,
    },
    /// The `Percent Done` value could not be parsed as a number.
    #[error("torrent completion percent invalid")]
    PercentInvalid {
        /// Torrent identifier the report was fetched for.
        id: i64,
        /// Offending value as written in the report.
        value: String,
    },
    /// The `Ratio` value could not be parsed as a number.
    #[error("torrent ratio invalid")]
    RatioInvalid {
        /// Torrent identifier the report was fetched for.
        id: i64,
        /// Offending value as written in the report.
        value: String,
    },
    /// The `Date finished` value could not be parsed as a timestamp.
    #[error("torrent finish date invalid")]
    DateInvalid {
        /// Torrent identifier the report was fetched for.
        id: i64,
        /// Offending value as written in the report.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn parse_error_converts_into_console_error() {
        let console: ConsoleError = ParseError::RatioMissing { id: 35 }.into();
        assert!(matches!(
            console,
            ConsoleError::Parse {
                source: ParseError::RatioMissing { id: 35 }
            }
        ));
        assert!(console.source().is_some());
    }

    #[test]
    fn spawn_error_preserves_io_source() {
        let err = ConsoleError::Spawn {
            command: "transmission-remote 127.0.0.1:9091 --list".to_string(),
            source: io::Error::other("spawn"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn rejection_messages_stay_constant() {
        let err = ConsoleError::StopRejected {
            id: 7,
            name: "demo".to_string(),
            output: "responded: \"error\"".to_string(),
        };
        assert_eq!(err.to_string(), "torrent stop rejected by daemon");
    }
}
