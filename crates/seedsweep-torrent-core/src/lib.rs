//! Daemon-agnostic torrent housekeeping interfaces and DTOs.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

mod error;

pub use error::{ConsoleError, ConsoleResult, ParseError, ParseResult};

/// Timestamp format used when rendering completion times in log output.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Snapshot of a single torrent, rebuilt on every evaluation cycle.
///
/// A record is only meaningful immediately after a successful detail
/// fetch and parse; it is never reused across torrent ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Daemon-assigned identifier, unique within one listing.
    pub id: i64,
    /// Display name; doubles as the on-disk leaf name.
    pub name: String,
    /// Free-text status token (`Idle`, `Seeding`, ...), informational only.
    pub state: String,
    /// Absolute directory the torrent data lives in.
    pub location: String,
    /// Completion percentage, 0 to 100.
    pub percent: f64,
    /// Upload/download ratio.
    pub ratio: f64,
    /// Completion timestamp as reported by the daemon.
    pub date_done: NaiveDateTime,
    /// Seconds between "now" and `date_done`, fixed at parse time.
    pub date_difference: i64,
}

impl TorrentRecord {
    /// Completion time rendered for human-facing log lines.
    #[must_use]
    pub fn date_done_display(&self) -> String {
        self.date_done.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Whether the torrent has finished downloading.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        (self.percent - 100.0).abs() < f64::EPSILON
    }

    /// Judge this record against the configured limits.
    ///
    /// Ratio is evaluated before age, so a torrent crossing both limits
    /// is always reported as a ratio-triggered removal.
    #[must_use]
    pub fn verdict(&self, thresholds: SweepThresholds) -> Verdict {
        if !self.is_complete() {
            return Verdict::Incomplete;
        }
        if self.ratio >= thresholds.ratio_limit {
            return Verdict::RatioLimit;
        }
        if self.date_difference >= thresholds.limit_time {
            return Verdict::TimeLimit;
        }
        Verdict::Keep
    }
}

/// Limits a completed torrent is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepThresholds {
    /// Seeding ratio at or above which a torrent is cleared.
    pub ratio_limit: f64,
    /// Seconds since completion at or above which a torrent is cleared.
    pub limit_time: i64,
}

/// Outcome of judging one torrent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not fully downloaded; never eligible for clearing.
    Incomplete,
    /// Seeding ratio reached the configured limit.
    RatioLimit,
    /// Completed long enough ago to cross the age limit.
    TimeLimit,
    /// Below every limit; leave the torrent alone.
    Keep,
}

/// Remote-control surface of the torrent daemon.
///
/// Implementations shell out to the daemon's control tool; every call maps
/// to exactly one external command.
#[async_trait]
pub trait RemoteConsole: Send + Sync {
    /// List the ids of all currently registered torrents, in listing order.
    async fn list_ids(&self) -> ConsoleResult<Vec<i64>>;
    /// Fetch and parse the detail report for one torrent.
    async fn fetch_info(&self, id: i64) -> ConsoleResult<TorrentRecord>;
    /// Halt transfer for the torrent.
    async fn stop(&self, record: &TorrentRecord) -> ConsoleResult<()>;
    /// Deregister the torrent, leaving its files on disk.
    async fn remove(&self, record: &TorrentRecord) -> ConsoleResult<()>;
    /// Deregister the torrent and delete its files.
    async fn remove_with_data(&self, record: &TorrentRecord) -> ConsoleResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(percent: f64, ratio: f64, date_difference: i64) -> TorrentRecord {
        TorrentRecord {
            id: 7,
            name: "Beacon.23.S02E02.1080p.mkv".to_string(),
            state: "Seeding".to_string(),
            location: "/mnt/media/downloads".to_string(),
            percent,
            ratio,
            date_done: NaiveDate::from_ymd_opt(2024, 4, 25)
                .and_then(|date| date.and_hms_opt(22, 20, 32))
                .unwrap_or_default(),
            date_difference,
        }
    }

    const LIMITS: SweepThresholds = SweepThresholds {
        ratio_limit: 2.0,
        limit_time: 604_800,
    };

    #[test]
    fn ratio_limit_takes_priority_over_age() {
        let judged = record(100.0, 3.0, 9_000_000).verdict(LIMITS);
        assert_eq!(judged, Verdict::RatioLimit);
    }

    #[test]
    fn ratio_limit_fires_regardless_of_age() {
        let judged = record(100.0, 3.0, 0).verdict(LIMITS);
        assert_eq!(judged, Verdict::RatioLimit);
    }

    #[test]
    fn age_limit_fires_when_ratio_is_low() {
        let judged = record(100.0, 0.5, 700_000).verdict(LIMITS);
        assert_eq!(judged, Verdict::TimeLimit);
    }

    #[test]
    fn exact_limits_count_as_reached() {
        assert_eq!(record(100.0, 2.0, 0).verdict(LIMITS), Verdict::RatioLimit);
        assert_eq!(record(100.0, 0.0, 604_800).verdict(LIMITS), Verdict::TimeLimit);
    }

    #[test]
    fn below_every_limit_keeps_the_torrent() {
        let judged = record(100.0, 0.5, 100).verdict(LIMITS);
        assert_eq!(judged, Verdict::Keep);
    }

    #[test]
    fn incomplete_torrent_is_never_eligible() {
        let judged = record(66.0, 15.0, 9_000_000).verdict(LIMITS);
        assert_eq!(judged, Verdict::Incomplete);
    }

    #[test]
    fn fractional_percent_is_incomplete() {
        let judged = record(99.9, 15.0, 9_000_000).verdict(LIMITS);
        assert_eq!(judged, Verdict::Incomplete);
    }

    #[test]
    fn date_done_display_uses_dotted_format() {
        let shown = record(100.0, 0.0, 0).date_done_display();
        assert_eq!(shown, "25.04.2024 22:20:32");
    }
}
