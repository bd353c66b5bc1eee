//! Baseline values applied before any configuration source is consulted.
//!
//! # Design
//! - Centralize defaults so loader and tests agree on the starting state.
//! - Keep time-based defaults explicit for auditability.

/// Default daemon host.
pub(crate) const IP_ADDRESS: &str = "127.0.0.1";
/// Default daemon RPC port.
pub(crate) const PORT: u16 = 9091;
/// Default seed ratio threshold, used unless the daemon enforces its own.
pub(crate) const RATIO_LIMIT: f64 = 2.0;
/// Default seeding age threshold in seconds (seven days).
pub(crate) const LIMIT_TIME_SECS: u64 = 604_800;
/// Default log verbosity directive.
pub(crate) const LOG_LEVEL: &str = "info";
/// Default log file destination.
pub(crate) const LOG_FILE_PATH: &str = "/var/log/transmission/seedsweep.log";
/// Default location of the daemon's own settings document.
pub(crate) const SETTINGS_FILE_PATH: &str = "/etc/transmission-daemon/settings.json";
/// Default media extension allow-list.
pub(crate) const MEDIA_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi"];
