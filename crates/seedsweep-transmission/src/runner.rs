//! Subprocess execution for `transmission-remote` invocations.
//!
//! # Design
//! - One external command at a time, each bounded by a fixed deadline.
//! - Captured stdout is handed back as text; stderr only surfaces in errors.
//! - A command overrunning its deadline is killed, not detached.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use seedsweep_torrent_core::{ConsoleError, ConsoleResult};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Deadline for a single remote-control invocation, in milliseconds.
pub const COMMAND_TIMEOUT_MS: u64 = 2_000;

/// Executes one command line and returns its captured standard output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command line to completion.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Spawn`] when the process cannot start,
    /// [`ConsoleError::Exit`] on a non-zero exit status, and
    /// [`ConsoleError::Timeout`] when the deadline elapses first.
    async fn run(&self, command_line: &str) -> ConsoleResult<String>;
}

/// Production runner backed by a real child process.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    deadline: Duration,
}

impl ShellRunner {
    /// Build a runner with the standard deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadline: Duration::from_millis(COMMAND_TIMEOUT_MS),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str) -> ConsoleResult<String> {
        let mut parts = command_line.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(ConsoleError::Spawn {
                command: command_line.to_owned(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "empty command line",
                ),
            });
        };

        let mut command = Command::new(program);
        command
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %command_line, "running remote command");
        let output = match timeout(self.deadline, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ConsoleError::Spawn {
                    command: command_line.to_owned(),
                    source,
                });
            }
            Err(_elapsed) => {
                return Err(ConsoleError::Timeout {
                    command: command_line.to_owned(),
                    limit_ms: COMMAND_TIMEOUT_MS,
                });
            }
        };

        if !output.status.success() {
            return Err(ConsoleError::Exit {
                command: command_line.to_owned(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
