//! Sweep engine that lists registered torrents, judges each against the
//! configured limits, and clears the ones that crossed them.
//!
//! Clearing stops the torrent first, then picks the deregistration verb
//! from the payload's on-disk disposition: directories are removed with
//! their data, files are removed and kept on disk when the media gate
//! allows their extension, absent payloads are removed outright.

use regex::Regex;
use seedsweep_config::ErrorPolicy;
use seedsweep_fsops::{Disposition, classify, payload_path};
use seedsweep_torrent_core::{RemoteConsole, SweepThresholds, TorrentRecord, Verdict};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};

const RULE: &str = "##############################################";
const TORRENT_RULE: &str = "==============================";

/// Tunables for one sweep run.
#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// Limits a completed torrent is judged against.
    pub thresholds: SweepThresholds,
    /// How to react when a single torrent fails mid-sweep.
    pub policy: ErrorPolicy,
    /// Extension filter applied to single-file payloads before removal;
    /// `None` removes regardless of extension.
    pub media_gate: Option<Regex>,
    /// Version string printed in the start banner.
    pub app_version: &'static str,
}

/// Counters and per-torrent outcomes accumulated over one sweep run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepReport {
    /// Torrents examined, including ones that later failed.
    pub processed: u64,
    /// Torrents whose clearing sequence completed without error.
    pub cleared: u64,
    /// Listing snapshot the sweep walked, in daemon order.
    pub ids: Vec<i64>,
    /// Torrents skipped after a failure, with the rendered error.
    pub failures: Vec<(i64, String)>,
}

/// One-shot housekeeping cycle over every torrent the daemon lists.
pub struct SweepEngine<C> {
    console: C,
    settings: SweepSettings,
}

impl<C: RemoteConsole> SweepEngine<C> {
    /// Build an engine over the given console.
    #[must_use]
    pub const fn new(console: C, settings: SweepSettings) -> Self {
        Self { console, settings }
    }

    /// Run one full sweep and report what happened.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing cannot be fetched, or when a
    /// torrent fails and the error policy is [`ErrorPolicy::Abort`].
    pub async fn run(&self) -> AppResult<SweepReport> {
        info!("{RULE}");
        info!(version = self.settings.app_version, "torrent sweep starting");
        let outcome = self.cycle().await;
        match &outcome {
            Ok(report) => info!(
                processed = report.processed,
                cleared = report.cleared,
                failed = report.failures.len(),
                "torrent sweep finished"
            ),
            Err(err) => error!(error = %err, "torrent sweep aborted"),
        }
        info!("{RULE}");
        outcome
    }

    async fn cycle(&self) -> AppResult<SweepReport> {
        let mut report = SweepReport::default();
        let ids = self
            .console
            .list_ids()
            .await
            .map_err(|err| AppError::console("console.list_ids", err))?;
        report.ids = ids.clone();
        for id in ids {
            info!("{TORRENT_RULE}");
            report.processed += 1;
            match self.process(id).await {
                Ok(true) => report.cleared += 1,
                Ok(false) => {}
                Err(err) => match self.settings.policy {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Continue => {
                        warn!(torrent_id = id, error = %err, "torrent skipped after failure");
                        report.failures.push((id, err.to_string()));
                    }
                },
            }
        }
        Ok(report)
    }

    /// Judge one torrent; returns whether its clearing sequence completed.
    async fn process(&self, id: i64) -> AppResult<bool> {
        let record = self
            .console
            .fetch_info(id)
            .await
            .map_err(|err| AppError::console("console.fetch_info", err))?;
        info!(
            torrent_id = record.id,
            name = %record.name,
            state = %record.state,
            ratio = record.ratio,
            date_done = %record.date_done_display(),
            "torrent inspected"
        );
        match record.verdict(self.settings.thresholds) {
            Verdict::Incomplete => {
                info!(
                    torrent_id = record.id,
                    percent = record.percent,
                    "download not finished, no action"
                );
                Ok(false)
            }
            Verdict::Keep => {
                info!(torrent_id = record.id, "limits not reached, no action");
                Ok(false)
            }
            Verdict::RatioLimit => {
                info!(
                    torrent_id = record.id,
                    ratio = record.ratio,
                    limit = self.settings.thresholds.ratio_limit,
                    "ratio limit reached, clearing"
                );
                self.clear(&record).await?;
                Ok(true)
            }
            Verdict::TimeLimit => {
                info!(
                    torrent_id = record.id,
                    age_secs = record.date_difference,
                    limit_secs = self.settings.thresholds.limit_time,
                    "age limit reached, clearing"
                );
                self.clear(&record).await?;
                Ok(true)
            }
        }
    }

    /// Stop the torrent, then deregister it according to its payload disposition.
    async fn clear(&self, record: &TorrentRecord) -> AppResult<()> {
        self.console
            .stop(record)
            .await
            .map_err(|err| AppError::console("console.stop", err))?;
        let path = payload_path(&record.location, &record.name);
        let disposition = classify(&path).map_err(|err| AppError::fsops("fsops.classify", err))?;
        match disposition {
            Disposition::Directory => {
                info!(
                    torrent_id = record.id,
                    path = %path.display(),
                    "directory payload, removing torrent with its data"
                );
                self.console
                    .remove_with_data(record)
                    .await
                    .map_err(|err| AppError::console("console.remove_with_data", err))?;
            }
            Disposition::File => {
                if self.allows_media(&record.name) {
                    info!(
                        torrent_id = record.id,
                        path = %path.display(),
                        "file payload, removing torrent and keeping the file"
                    );
                    self.console
                        .remove(record)
                        .await
                        .map_err(|err| AppError::console("console.remove", err))?;
                } else {
                    debug!(
                        torrent_id = record.id,
                        name = %record.name,
                        "extension outside the allowed media set, leaving the torrent stopped"
                    );
                }
            }
            Disposition::NotFound => {
                warn!(
                    torrent_id = record.id,
                    path = %path.display(),
                    "payload already gone, removing torrent"
                );
                self.console
                    .remove(record)
                    .await
                    .map_err(|err| AppError::console("console.remove", err))?;
            }
            Disposition::Unknown => {
                debug!(
                    torrent_id = record.id,
                    path = %path.display(),
                    "payload is neither file nor directory, leaving the torrent stopped"
                );
            }
        }
        Ok(())
    }

    fn allows_media(&self, name: &str) -> bool {
        self.settings
            .media_gate
            .as_ref()
            .is_none_or(|gate| gate.is_match(name))
    }
}
