//! On-disk disposition probing for torrent payloads.
#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

mod error;

pub use error::{FsOpsError, FsOpsResult};

/// Classification of a torrent's on-disk payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The payload is a single regular file.
    File,
    /// The payload is a directory.
    Directory,
    /// Nothing exists at the payload path.
    NotFound,
    /// The path exists but is neither a regular file nor a directory.
    Unknown,
}

/// Join a torrent's download location and display name into the payload path.
#[must_use]
pub fn payload_path(location: &str, name: &str) -> PathBuf {
    Path::new(location).join(name)
}

/// Probe the payload path without following symbolic links.
///
/// A dangling or intact symlink, a device node, a socket, or any other
/// non-regular entry classifies as [`Disposition::Unknown`]; a missing
/// path classifies as [`Disposition::NotFound`].
///
/// # Errors
///
/// Returns [`FsOpsError::Probe`] for probe failures other than the
/// path not existing, such as a permission denial on a parent directory.
pub fn classify(path: &Path) -> FsOpsResult<Disposition> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            let file_type = metadata.file_type();
            let disposition = if file_type.is_file() {
                Disposition::File
            } else if file_type.is_dir() {
                Disposition::Directory
            } else {
                Disposition::Unknown
            };
            debug!(path = %path.display(), disposition = ?disposition, "payload probed");
            Ok(disposition)
        }
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "payload path does not exist");
            Ok(Disposition::NotFound)
        }
        Err(source) => Err(FsOpsError::probe(path, source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn regular_file_classifies_as_file() -> Result<(), Box<dyn Error>> {
        let temp = TempDir::new()?;
        let path = temp.path().join("episode.mkv");
        fs::write(&path, b"payload")?;
        assert_eq!(classify(&path)?, Disposition::File);
        Ok(())
    }

    #[test]
    fn directory_classifies_as_directory() -> Result<(), Box<dyn Error>> {
        let temp = TempDir::new()?;
        let path = temp.path().join("season-pack");
        fs::create_dir(&path)?;
        assert_eq!(classify(&path)?, Disposition::Directory);
        Ok(())
    }

    #[test]
    fn missing_path_classifies_as_not_found() -> Result<(), Box<dyn Error>> {
        let temp = TempDir::new()?;
        let path = temp.path().join("vanished.mkv");
        assert_eq!(classify(&path)?, Disposition::NotFound);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlink_classifies_as_unknown() -> Result<(), Box<dyn Error>> {
        let temp = TempDir::new()?;
        let target = temp.path().join("target.mkv");
        fs::write(&target, b"payload")?;
        let link = temp.path().join("alias.mkv");
        std::os::unix::fs::symlink(&target, &link)?;
        assert_eq!(classify(&link)?, Disposition::Unknown);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_classifies_as_unknown() -> Result<(), Box<dyn Error>> {
        let temp = TempDir::new()?;
        let link = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("gone"), &link)?;
        assert_eq!(classify(&link)?, Disposition::Unknown);
        Ok(())
    }

    #[test]
    fn payload_path_joins_location_and_name() {
        let path = payload_path("/mnt/media/downloads", "episode.mkv");
        assert_eq!(path, Path::new("/mnt/media/downloads/episode.mkv"));
    }
}
