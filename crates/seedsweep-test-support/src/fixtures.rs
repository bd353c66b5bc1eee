//! Canned `transmission-remote` reports captured from a live daemon.

use chrono::NaiveDateTime;
use seedsweep_torrent_core::TorrentRecord;

/// Listing with a single seeding torrent between the header and `Sum:` trailer.
pub const LIST_ONE_TORRENT: &str = "\
ID     Done       Have  ETA           Up    Down  Ratio  Status       Name
  35   100%   22.11 GB  12 days      0.0     0.0    0.0  Seeding      Шерлок Холмс S01 Serial WEB-DL (1080p)
Sum:          24.08 GB              15.0  18007.0";

/// Listing with two torrents; ids must surface in row order.
pub const LIST_TWO_TORRENTS: &str = "\
ID     Done       Have  ETA           Up    Down  Ratio  Status       Name
   7   100%    2.86 GB  Unknown      0.0     0.0    3.6  Idle         Beacon.23.S02E02.1080p.rus.LostFilm.TV.mkv
   9    66%    1.02 GB  2 hrs        0.0   512.0    0.1  Downloading  Fallout.S01E04.1080p.rus.LostFilm.TV.mkv
Sum:           3.88 GB              15.0  18007.0";

/// Listing whose only content is the header and trailer.
pub const LIST_EMPTY: &str = "\
ID     Done       Have  ETA           Up    Down  Ratio  Status       Name
Sum:              0 GB               0.0      0.0";

/// Full detail report for torrent 35, every section included.
pub const INFO_SHERLOCK: &str = "\
NAME
  Id: 35
  Name: Шерлок Холмс S01 Serial WEB-DL (1080p)
  Hash: 64fab1c4a1fb9f48da1a886b252ac04b796df348
  Labels:

TRANSFER
  State: Idle
  Location: /mnt/downloads
  Percent Done: 100%
  ETA: 0 seconds (0 seconds)
  Download Speed: 0 kB/s
  Upload Speed: 0 kB/s
  Have: 2.86 GB (2.86 GB verified)
  Availability: 100%
  Total size: 2.86 GB (2.86 GB wanted)
  Downloaded: 2.89 GB
  Uploaded: 1.81 GB
  Ratio: 0.6
  Corrupt DL: None
  Peers: connected to 4, uploading to 0, downloading from 0

HISTORY
  Date added:       Thu Apr 25 22:16:07 2024
  Date finished:    Thu Apr 25 22:20:32 2024
  Date started:     Thu Apr 25 22:16:07 2024
  Latest activity:  Sat Apr 27 18:47:33 2024
  Downloading Time: 4 minutes (267 seconds)
  Seeding Time:     2 days, 2 hours (180111 seconds)

ORIGINS
  Date created: Tue Apr 16 19:15:17 2024
  Public torrent: Yes
  Comment: LostFilm.TV(c)
  Creator: uTorrent/3310
  Piece Count: 682
  Piece Size: 4.00 MiB

LIMITS & BANDWIDTH
  Download Limit: Unlimited
  Upload Limit: Unlimited
  Ratio Limit: Default
  Honors Session Limits: Yes
  Peer limit: 50
  Bandwidth Priority: Normal
";

/// Response the daemon prints after acknowledging a mutating verb.
pub const RESPONSE_SUCCESS: &str = "192.168.88.22:9092/transmission/rpc/\nresponded: \"success\"";

/// Response the daemon prints when a mutating verb is refused.
pub const RESPONSE_FAILURE: &str = "192.168.88.22:9092/transmission/rpc/\nresponded: \"error\"";

/// Render a detail report with the interesting fields substituted.
///
/// `date_finished` must already be in the daemon's ctime-style format,
/// for example `Thu Apr 25 22:20:32 2024`.
#[must_use]
pub fn info_report(
    name: &str,
    state: &str,
    location: &str,
    percent: &str,
    ratio: &str,
    date_finished: &str,
) -> String {
    format!(
        "\
NAME
  Name: {name}

TRANSFER
  State: {state}
  Location: {location}
  Percent Done: {percent}%
  Ratio: {ratio}

HISTORY
  Date added:       Thu Apr 25 22:16:07 2024
  Date finished:    {date_finished}
"
    )
}

/// Render a single-row listing for the given torrent id.
#[must_use]
pub fn list_report(id: i64, name: &str) -> String {
    format!(
        "\
ID     Done       Have  ETA           Up    Down  Ratio  Status       Name
  {id}   100%    2.86 GB  Unknown      0.0     0.0    3.6  Idle         {name}
Sum:           2.86 GB               0.0      0.0"
    )
}

/// Build a complete record for engine tests that skip the parsing layer.
#[must_use]
pub fn record(id: i64, percent: f64, ratio: f64, date_difference: i64) -> TorrentRecord {
    TorrentRecord {
        id,
        name: format!("fixture-{id}.mkv"),
        state: "Seeding".to_string(),
        location: "/mnt/downloads".to_string(),
        percent,
        ratio,
        date_done: NaiveDateTime::default(),
        date_difference,
    }
}
