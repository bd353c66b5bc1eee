//! Logging setup shared across the sweep workspace.
//!
//! Centralises tracing subscriber installation so the binary and tests adopt
//! a consistent output story: console always, plus an append-mode log file
//! when one is configured and writable.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default logging target when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Log level string (e.g., `info`, `debug`).
    pub level: &'a str,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
    /// Optional log file destination. An unwritable path falls back to
    /// console-only output instead of failing.
    pub log_file: Option<&'a Path>,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            log_file: None,
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable logs.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level));
    let log_file = config.log_file.and_then(open_log_file);

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .with(log_file.map(|file| {
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(file)
            }))
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .with(log_file.map(|file| {
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(file)
            }))
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
    }
}

fn open_log_file(path: &Path) -> Option<Arc<File>> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(Arc::new(file)),
        Err(err) => {
            eprintln!(
                "log file '{}' unavailable ({err}); logging to console only",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_logging_installs_subscriber_once() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Pretty,
            log_file: None,
        };
        let _ = init_logging(&config);
    }

    #[test]
    fn configured_log_file_is_created_eagerly() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("seedsweep.log");
        let config = LoggingConfig {
            level: "debug",
            format: LogFormat::Json,
            log_file: Some(&path),
        };
        let _ = init_logging(&config);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_file_falls_back_to_console() {
        let file = open_log_file(Path::new("/nonexistent/dir/seedsweep.log"));
        assert!(file.is_none());
    }
}
