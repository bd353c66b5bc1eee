//! Typed runtime settings consumed by the sweep engine and its wiring.
//!
//! # Design
//! - Pure data carrier; merging and validation live in `loader.rs`.
//! - Accessors derive the compiled forms (thresholds, extension pattern)
//!   so consumers never re-interpret raw strings.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use regex::Regex;
use seedsweep_torrent_core::SweepThresholds;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};

/// Effective settings after defaults, file, environment, and the daemon's
/// own document have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Daemon host or address.
    pub ip_address: String,
    /// Daemon RPC port.
    pub port: u16,
    /// RPC login. Required; no default.
    pub login: String,
    /// RPC password. Required; no default.
    pub password: String,
    /// Seed ratio at or above which a finished torrent is cleared.
    pub ratio_limit: f64,
    /// Seeding age in seconds at or above which a finished torrent is cleared.
    pub limit_time: u64,
    /// Extension allow-list consulted when enforcement is on.
    pub allowed_media_extensions: Vec<String>,
    /// Whether single-file payloads must match the extension allow-list.
    pub enforce_media_extensions: bool,
    /// How the sweep reacts to a per-torrent failure.
    pub error_policy: ErrorPolicy,
    /// Log verbosity directive.
    pub log_level: String,
    /// Log file destination; `None` disables the file writer.
    pub log_file_path: Option<PathBuf>,
    /// Location of the daemon's settings document.
    pub settings_file_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ip_address: defaults::IP_ADDRESS.to_string(),
            port: defaults::PORT,
            login: String::new(),
            password: String::new(),
            ratio_limit: defaults::RATIO_LIMIT,
            limit_time: defaults::LIMIT_TIME_SECS,
            allowed_media_extensions: defaults::MEDIA_EXTENSIONS
                .iter()
                .map(|extension| (*extension).to_string())
                .collect(),
            enforce_media_extensions: false,
            error_policy: ErrorPolicy::Abort,
            log_level: defaults::LOG_LEVEL.to_string(),
            log_file_path: Some(PathBuf::from(defaults::LOG_FILE_PATH)),
            settings_file_path: PathBuf::from(defaults::SETTINGS_FILE_PATH),
        }
    }
}

impl AppSettings {
    /// Clearing thresholds in the form the verdict logic consumes.
    #[must_use]
    pub fn thresholds(&self) -> SweepThresholds {
        SweepThresholds {
            ratio_limit: self.ratio_limit,
            limit_time: i64::try_from(self.limit_time).unwrap_or(i64::MAX),
        }
    }

    /// Compile the extension allow-list into a case-insensitive pattern
    /// over `.ext` suffixes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] when the compiled pattern is not a
    /// valid expression.
    pub fn media_extension_pattern(&self) -> ConfigResult<Regex> {
        let alternation = self
            .allowed_media_extensions
            .iter()
            .map(|extension| regex::escape(extension))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?i)\.({alternation})$");
        Regex::new(&pattern).map_err(|source| ConfigError::Pattern { pattern, source })
    }

    /// The extension gate, or `None` when enforcement is off.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] when enforcement is on and the
    /// allow-list fails to compile.
    pub fn media_gate(&self) -> ConfigResult<Option<Regex>> {
        if self.enforce_media_extensions {
            Ok(Some(self.media_extension_pattern()?))
        } else {
            Ok(None)
        }
    }
}

/// Reaction to a per-torrent failure mid-sweep.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the cycle on the first failing torrent.
    #[default]
    Abort,
    /// Record the failure and move on to the next torrent.
    Continue,
}

impl ErrorPolicy {
    /// Render the policy as its lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Continue => "continue",
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "continue" => Ok(Self::Continue),
            other => Err(anyhow!("invalid error policy '{other}'")),
        }
    }
}
