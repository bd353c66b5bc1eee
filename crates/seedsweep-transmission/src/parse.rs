//! Parsers for `transmission-remote` listing and detail reports.
//!
//! # Design
//! - The listing is scanned row by row; anything that does not look like a
//!   torrent row (header, `Sum:` trailer, blanks) is skipped.
//! - The detail report is scanned line by line and the first occurrence of
//!   each labelled field wins. Later sections repeat similar labels
//!   (`Date started:`, `Ratio Limit:`), so matching is on the exact label
//!   at the start of a line, never on substrings.
//! - Fields are extracted exactly as written; absent and malformed values
//!   fail with distinct reasons.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use seedsweep_torrent_core::{ParseError, ParseResult, TorrentRecord};
use tracing::warn;

/// Timestamp format the daemon prints for `Date finished:` lines.
pub const REPORT_DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

static LIST_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s+(\d+)\s.*$").expect("list row pattern is valid"));

/// Extract torrent ids from a listing report, in encounter order.
///
/// Rows are lines whose first column after leading whitespace is an
/// integer id. Duplicate ids are kept as-is; a report with no rows
/// yields an empty list. An id too large for `i64` is logged and its
/// row skipped.
#[must_use]
pub fn parse_list(raw: &str) -> Vec<i64> {
    LIST_ROW
        .captures_iter(raw)
        .filter_map(|row| row.get(1))
        .filter_map(|id| {
            let parsed = id.as_str().parse().ok();
            if parsed.is_none() {
                warn!(id = id.as_str(), "listing id does not fit a 64-bit integer, skipping row");
            }
            parsed
        })
        .collect()
}

/// Extract a [`TorrentRecord`] from a detail report.
///
/// `now` anchors the derived age; production passes the current local
/// time and tests pass a fixed instant.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the first required field that is
/// missing from the report, or carrying the offending text when a
/// present value fails to parse.
pub fn parse_info(id: i64, raw: &str, now: NaiveDateTime) -> ParseResult<TorrentRecord> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyReport { id });
    }

    let fields = scan_fields(raw);

    let name = fields.name.ok_or(ParseError::NameMissing { id })?;
    let state = fields.state.ok_or(ParseError::StateMissing { id })?;
    let location = fields.location.ok_or(ParseError::LocationMissing { id })?;
    let percent_text = fields.percent.ok_or(ParseError::PercentMissing { id })?;
    let ratio_text = fields.ratio.ok_or(ParseError::RatioMissing { id })?;
    let date_text = fields.date_finished.ok_or(ParseError::DateMissing { id })?;

    let percent: f64 = percent_text
        .parse()
        .map_err(|_| ParseError::PercentInvalid {
            id,
            value: percent_text.clone(),
        })?;
    let ratio: f64 = ratio_text.parse().map_err(|_| ParseError::RatioInvalid {
        id,
        value: ratio_text.clone(),
    })?;
    let date_done = NaiveDateTime::parse_from_str(&date_text, REPORT_DATE_FORMAT).map_err(
        |_| ParseError::DateInvalid {
            id,
            value: date_text.clone(),
        },
    )?;

    let elapsed_ms = now.signed_duration_since(date_done).num_milliseconds();
    let date_difference = (elapsed_ms + 500).div_euclid(1_000);

    Ok(TorrentRecord {
        id,
        name,
        state,
        location,
        percent,
        ratio,
        date_done,
        date_difference,
    })
}

#[derive(Default)]
struct ReportFields {
    name: Option<String>,
    state: Option<String>,
    location: Option<String>,
    percent: Option<String>,
    ratio: Option<String>,
    date_finished: Option<String>,
}

fn scan_fields(raw: &str) -> ReportFields {
    let mut fields = ReportFields::default();
    for line in raw.lines() {
        let line = line.trim_start();
        if let Some(value) = labelled(line, "Name:") {
            keep_first(&mut fields.name, value);
        } else if let Some(value) = labelled(line, "State:") {
            keep_first(&mut fields.state, value);
        } else if let Some(value) = labelled(line, "Location:") {
            keep_first(&mut fields.location, value);
        } else if let Some(value) = labelled(line, "Percent Done:") {
            if let Some(number) = value.strip_suffix('%') {
                keep_first(&mut fields.percent, number.trim_end().to_owned());
            }
        } else if let Some(value) = labelled(line, "Ratio:") {
            keep_first(&mut fields.ratio, value);
        } else if let Some(value) = labelled(line, "Date finished:") {
            keep_first(&mut fields.date_finished, value);
        }
    }
    fields
}

fn labelled(line: &str, label: &str) -> Option<String> {
    let value = line.strip_prefix(label)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

fn keep_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use seedsweep_test_support::fixtures;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 27)
            .and_then(|date| date.and_hms_opt(18, 47, 33))
            .expect("valid timestamp")
    }

    #[test]
    fn listing_rows_yield_ids_in_order() {
        let ids = parse_list(fixtures::LIST_TWO_TORRENTS);
        assert_eq!(ids, vec![7, 9]);
    }

    #[test]
    fn single_row_listing_yields_one_id() {
        let ids = parse_list(fixtures::LIST_ONE_TORRENT);
        assert_eq!(ids, vec![35]);
    }

    #[test]
    fn header_and_sum_rows_never_match() {
        let ids = parse_list(fixtures::LIST_EMPTY);
        assert!(ids.is_empty());
    }

    #[test]
    fn blank_listing_is_not_an_error() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("\n\n").is_empty());
    }

    #[test]
    fn repeated_ids_are_preserved() {
        let raw = "ID     Done  Name\n  35   100%  one\n  35   100%  one again\n";
        assert_eq!(parse_list(raw), vec![35, 35]);
    }

    #[test]
    fn oversized_ids_are_skipped() {
        let raw =
            "ID     Done  Name\n  99999999999999999999   100%  huge\n  7   100%  fits\n";
        assert_eq!(parse_list(raw), vec![7]);
    }

    #[test]
    fn detail_report_parses_every_field() -> anyhow::Result<()> {
        let record = parse_info(35, fixtures::INFO_SHERLOCK, fixed_now())?;
        assert_eq!(record.id, 35);
        assert_eq!(record.name, "Шерлок Холмс S01 Serial WEB-DL (1080p)");
        assert_eq!(record.state, "Idle");
        assert_eq!(record.location, "/mnt/downloads");
        assert!((record.percent - 100.0).abs() < f64::EPSILON);
        assert!((record.ratio - 0.6).abs() < f64::EPSILON);
        assert_eq!(record.date_done_display(), "25.04.2024 22:20:32");
        Ok(())
    }

    #[test]
    fn derived_age_counts_seconds_from_now() -> anyhow::Result<()> {
        // Finished Thu Apr 25 22:20:32, "now" fixed at Apr 27 18:47:33.
        let record = parse_info(35, fixtures::INFO_SHERLOCK, fixed_now())?;
        assert_eq!(record.date_difference, 160_021);
        Ok(())
    }

    #[test]
    fn first_occurrence_of_a_label_wins() -> anyhow::Result<()> {
        // HISTORY carries `Date started:` and LIMITS carries `Ratio Limit:`;
        // neither may shadow the wanted fields.
        let record = parse_info(35, fixtures::INFO_SHERLOCK, fixed_now())?;
        assert_eq!(record.date_done_display(), "25.04.2024 22:20:32");
        assert!((record.ratio - 0.6).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn empty_report_is_rejected() {
        let err = parse_info(35, "  \n ", fixed_now()).expect_err("blank report");
        assert!(matches!(err, ParseError::EmptyReport { id: 35 }));
    }

    #[test]
    fn missing_ratio_reports_the_ratio_reason() {
        let raw = fixtures::INFO_SHERLOCK.replace("  Ratio: 0.6\n", "");
        let err = parse_info(35, &raw, fixed_now()).expect_err("ratio gone");
        assert!(matches!(err, ParseError::RatioMissing { id: 35 }));
    }

    #[test]
    fn missing_name_reports_the_name_reason() {
        let raw =
            fixtures::INFO_SHERLOCK.replace("  Name: Шерлок Холмс S01 Serial WEB-DL (1080p)\n", "");
        let err = parse_info(35, &raw, fixed_now()).expect_err("name gone");
        assert!(matches!(err, ParseError::NameMissing { id: 35 }));
    }

    #[test]
    fn missing_state_reports_the_state_reason() {
        let raw = fixtures::INFO_SHERLOCK.replace("  State: Idle\n", "");
        let err = parse_info(35, &raw, fixed_now()).expect_err("state gone");
        assert!(matches!(err, ParseError::StateMissing { id: 35 }));
    }

    #[test]
    fn missing_location_reports_the_location_reason() {
        let raw = fixtures::INFO_SHERLOCK.replace("  Location: /mnt/downloads\n", "");
        let err = parse_info(35, &raw, fixed_now()).expect_err("location gone");
        assert!(matches!(err, ParseError::LocationMissing { id: 35 }));
    }

    #[test]
    fn missing_percent_reports_the_percent_reason() {
        let raw = fixtures::INFO_SHERLOCK.replace("  Percent Done: 100%\n", "");
        let err = parse_info(35, &raw, fixed_now()).expect_err("percent gone");
        assert!(matches!(err, ParseError::PercentMissing { id: 35 }));
    }

    #[test]
    fn percent_without_the_suffix_counts_as_missing() {
        let raw = fixtures::INFO_SHERLOCK.replace("  Percent Done: 100%\n", "  Percent Done: 100\n");
        let err = parse_info(35, &raw, fixed_now()).expect_err("no percent sign");
        assert!(matches!(err, ParseError::PercentMissing { id: 35 }));
    }

    #[test]
    fn missing_date_reports_the_date_reason() {
        let raw =
            fixtures::INFO_SHERLOCK.replace("  Date finished:    Thu Apr 25 22:20:32 2024\n", "");
        let err = parse_info(35, &raw, fixed_now()).expect_err("date gone");
        assert!(matches!(err, ParseError::DateMissing { id: 35 }));
    }

    #[test]
    fn unreadable_ratio_reports_the_offending_value() {
        let raw = fixtures::INFO_SHERLOCK.replace("  Ratio: 0.6\n", "  Ratio: half\n");
        let err = parse_info(35, &raw, fixed_now()).expect_err("bad ratio");
        let ParseError::RatioInvalid { value, .. } = err else {
            panic!("expected invalid ratio, got {err:?}");
        };
        assert_eq!(value, "half");
    }

    #[test]
    fn unreadable_date_reports_the_offending_value() {
        let raw = fixtures::INFO_SHERLOCK.replace(
            "  Date finished:    Thu Apr 25 22:20:32 2024\n",
            "  Date finished:    sometime in spring\n",
        );
        let err = parse_info(35, &raw, fixed_now()).expect_err("bad date");
        let ParseError::DateInvalid { value, .. } = err else {
            panic!("expected invalid date, got {err:?}");
        };
        assert_eq!(value, "sometime in spring");
    }

    #[test]
    fn fractional_percent_parses_as_written() -> anyhow::Result<()> {
        let raw = fixtures::INFO_SHERLOCK.replace("  Percent Done: 100%\n", "  Percent Done: 66.6%\n");
        let record = parse_info(35, &raw, fixed_now())?;
        assert!((record.percent - 66.6).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn single_digit_day_dates_parse() -> anyhow::Result<()> {
        let raw = fixtures::INFO_SHERLOCK.replace(
            "  Date finished:    Thu Apr 25 22:20:32 2024\n",
            "  Date finished:    Sun Apr  7 08:05:01 2024\n",
        );
        let record = parse_info(35, &raw, fixed_now())?;
        assert_eq!(record.date_done_display(), "07.04.2024 08:05:01");
        Ok(())
    }

    #[test]
    fn age_rounds_to_the_nearest_second() -> anyhow::Result<()> {
        let finished = NaiveDate::from_ymd_opt(2024, 4, 25)
            .and_then(|date| date.and_hms_opt(22, 20, 32))
            .expect("valid timestamp");
        let now = finished + chrono::Duration::milliseconds(1_500);
        let record = parse_info(35, fixtures::INFO_SHERLOCK, now)?;
        assert_eq!(record.date_difference, 2);
        Ok(())
    }
}
