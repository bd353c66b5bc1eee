//! Remote console backed by the `transmission-remote` executable.
//!
//! # Design
//! - Every daemon operation maps to exactly one command line built from a
//!   fixed connect prefix: `transmission-remote <host>:<port> --auth
//!   <login>:<password>`.
//! - Mutating verbs are acknowledged only by the substring `success`
//!   (case-insensitive) somewhere in the response; anything else is a
//!   rejection carrying the flattened response text.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use seedsweep_torrent_core::{ConsoleError, ConsoleResult, RemoteConsole, TorrentRecord};
use tracing::{debug, info};

use crate::parse;
use crate::runner::CommandRunner;

use async_trait::async_trait;

/// Name of the external remote-control executable.
pub const REMOTE_TOOL: &str = "transmission-remote";

static SUCCESS_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)success").expect("success marker pattern is valid"));

/// Connection coordinates for the daemon's RPC endpoint.
#[derive(Debug, Clone)]
pub struct ConnectProfile {
    /// Daemon host or address.
    pub host: String,
    /// Daemon RPC port.
    pub port: u16,
    /// RPC login.
    pub login: String,
    /// RPC password.
    pub password: String,
}

impl ConnectProfile {
    /// Render the connect prefix shared by every command line.
    #[must_use]
    pub fn command_prefix(&self) -> String {
        format!(
            "{REMOTE_TOOL} {}:{} --auth {}:{}",
            self.host, self.port, self.login, self.password
        )
    }
}

/// Console implementation that shells out through a [`CommandRunner`].
pub struct TransmissionConsole<R> {
    runner: R,
    connect: String,
}

impl<R: CommandRunner> TransmissionConsole<R> {
    /// Build a console for the given endpoint.
    #[must_use]
    pub fn new(runner: R, profile: &ConnectProfile) -> Self {
        Self {
            runner,
            connect: profile.command_prefix(),
        }
    }

    async fn run_acknowledged(
        &self,
        command: String,
        rejection: impl FnOnce(String) -> ConsoleError,
    ) -> ConsoleResult<()> {
        debug!(command = %command, "running mutating command");
        let output = self.runner.run(&command).await?;
        let flat = flatten(&output);
        debug!(response = %flat, "daemon responded");
        if SUCCESS_MARKER.is_match(&flat) {
            Ok(())
        } else {
            Err(rejection(flat))
        }
    }
}

#[async_trait]
impl<R: CommandRunner> RemoteConsole for TransmissionConsole<R> {
    async fn list_ids(&self) -> ConsoleResult<Vec<i64>> {
        let command = format!("{} --list", self.connect);
        debug!(command = %command, "listing torrents");
        let raw = self.runner.run(&command).await?;
        let ids = parse::parse_list(&raw);
        if ids.is_empty() {
            info!("no torrents registered");
        } else {
            info!(count = ids.len(), "torrents listed");
        }
        Ok(ids)
    }

    async fn fetch_info(&self, id: i64) -> ConsoleResult<TorrentRecord> {
        let command = format!("{} --torrent {id} --info", self.connect);
        debug!(command = %command, "fetching torrent detail");
        let raw = self.runner.run(&command).await?;
        let record = parse::parse_info(id, &raw, Local::now().naive_local())?;
        Ok(record)
    }

    async fn stop(&self, record: &TorrentRecord) -> ConsoleResult<()> {
        let command = format!("{} --torrent {} --stop", self.connect, record.id);
        debug!(id = record.id, name = %record.name, "stopping torrent");
        self.run_acknowledged(command, |output| ConsoleError::StopRejected {
            id: record.id,
            name: record.name.clone(),
            output,
        })
        .await
    }

    async fn remove(&self, record: &TorrentRecord) -> ConsoleResult<()> {
        let command = format!("{} --torrent {} --remove", self.connect, record.id);
        debug!(id = record.id, name = %record.name, "removing torrent, keeping files");
        self.run_acknowledged(command, |output| ConsoleError::RemoveRejected {
            id: record.id,
            name: record.name.clone(),
            output,
        })
        .await
    }

    async fn remove_with_data(&self, record: &TorrentRecord) -> ConsoleResult<()> {
        let command = format!("{} --torrent {} --remove-and-delete", self.connect, record.id);
        debug!(id = record.id, name = %record.name, "removing torrent and deleting files");
        self.run_acknowledged(command, |output| ConsoleError::RemoveAndDeleteRejected {
            id: record.id,
            name: record.name.clone(),
            output,
        })
        .await
    }
}

fn flatten(output: &str) -> String {
    output.replace(['\r', '\n'], "")
}
