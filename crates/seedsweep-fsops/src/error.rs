//! # Design
//!
//! - Structured, constant-message errors for payload probing.
//! - The probed path rides along so failures are reproducible in tests.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for filesystem probes.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced while probing torrent payloads.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// The filesystem status probe failed for a reason other than absence.
    #[error("payload probe failed")]
    Probe {
        /// Path that was probed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl FsOpsError {
    pub(crate) fn probe(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Probe {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn probe_helper_preserves_path_and_source() {
        let err = FsOpsError::probe("/mnt/media/locked", io::Error::other("denied"));
        let FsOpsError::Probe { ref path, .. } = err;
        assert_eq!(path, &PathBuf::from("/mnt/media/locked"));
        assert!(err.source().is_some());
    }
}
