//! # Design
//!
//! - Centralize application-level errors for bootstrap and the sweep cycle.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: seedsweep_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Remote console operations failed.
    #[error("remote console operation failed")]
    Console {
        /// Operation identifier.
        operation: &'static str,
        /// Source console error.
        source: seedsweep_torrent_core::ConsoleError,
    },
    /// Filesystem probing failed.
    #[error("filesystem probe failed")]
    FsOps {
        /// Operation identifier.
        operation: &'static str,
        /// Source fsops error.
        source: seedsweep_fsops::FsOpsError,
    },
    /// The sweep ran to completion but some torrents failed.
    #[error("sweep completed with failures")]
    SweepIncomplete {
        /// Number of torrents that failed.
        failed: usize,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: seedsweep_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) fn telemetry(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Telemetry {
            operation,
            source: source.into(),
        }
    }

    pub(crate) const fn console(
        operation: &'static str,
        source: seedsweep_torrent_core::ConsoleError,
    ) -> Self {
        Self::Console { operation, source }
    }

    pub(crate) const fn fsops(
        operation: &'static str,
        source: seedsweep_fsops::FsOpsError,
    ) -> Self {
        Self::FsOps { operation, source }
    }
}
