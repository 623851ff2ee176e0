//! Human-readable timestamp normalization.
//!
//! Produces two epoch values for a date/time string:
//!
//! - `naive`: the wall-clock time interpreted in the local timezone of the
//!   machine doing the parsing, ignoring any zone abbreviation in the text.
//! - `utc`: a timezone-aware value, only when the zone token is an
//!   unambiguous UTC marker. Abbreviations such as `PDT` or `IST` cannot be
//!   mapped to an offset without a timezone database and yield `None`.

use chrono::{Local, NaiveDateTime, TimeZone};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Layouts tried in order against the zone-stripped, whitespace-collapsed
/// input.
const FORMATS: &[&str] = &[
    // rpm: Thu 08 Aug 2019 05:47:25 PM
    "%a %d %b %Y %I:%M:%S %p",
    "%a %d %b %Y %H:%M:%S",
    // ctime / date: Thu Aug 8 17:47:25 2019
    "%a %b %d %H:%M:%S %Y",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    // schtasks: 10/20/2026 10:00:00 AM
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

const UTC_MARKERS: &[&str] = &["UTC", "GMT", "Z", "+0000", "+00:00", "UTC+0000", "UTC+00:00"];

/// Naive and UTC epoch seconds for one timestamp string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub naive: Option<i64>,
    pub utc: Option<i64>,
}

/// Parses a human-readable date/time string.
///
/// Never fails: an unrecognized layout yields `None` for both values.
///
/// # Examples
///
/// ```
/// use command_output_engine::timestamp::parse_timestamp;
///
/// let ts = parse_timestamp("Thu 08 Aug 2019 05:47:25 PM UTC");
/// assert_eq!(ts.utc, Some(1_565_286_445));
/// assert!(ts.naive.is_some());
///
/// let ts = parse_timestamp("Thu 08 Aug 2019 05:47:25 PM PDT");
/// assert_eq!(ts.utc, None);
/// assert!(ts.naive.is_some());
/// ```
pub fn parse_timestamp(input: &str) -> Timestamp {
    let mut tokens: Vec<&str> = input.split_whitespace().collect();
    let mut zone = None;
    if tokens.len() > 1 && tokens.last().is_some_and(|t| is_zone_token(t)) {
        zone = tokens.pop();
    }

    let mut body = tokens.join(" ");
    if zone.is_none() && iso_zulu_suffix(&body) {
        body.pop();
        zone = Some("Z");
    }

    let Some(datetime) = parse_naive(&body) else {
        trace!(input, "Unrecognized timestamp layout");
        return Timestamp::default();
    };

    let naive = Local
        .from_local_datetime(&datetime)
        .earliest()
        .map(|dt| dt.timestamp());
    let utc = zone
        .filter(|z| is_utc_marker(z))
        .map(|_| datetime.and_utc().timestamp());

    Timestamp { naive, utc }
}

fn parse_naive(body: &str) -> Option<NaiveDateTime> {
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(body, format).ok())
}

fn is_utc_marker(token: &str) -> bool {
    UTC_MARKERS
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(token))
}

/// Returns `true` when a trailing token names a timezone rather than being
/// part of the date/time itself.
fn is_zone_token(token: &str) -> bool {
    // SAFETY: compile-time constant pattern, exercised by tests.
    static OFFSET_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[+-]\d{2}:?\d{2}$").expect("static regex must compile"));

    if is_utc_marker(token) || OFFSET_RE.is_match(token) {
        return true;
    }
    if token.eq_ignore_ascii_case("AM") || token.eq_ignore_ascii_case("PM") {
        return false;
    }
    (1..=5).contains(&token.len()) && token.chars().all(|ch| ch.is_ascii_uppercase())
}

fn iso_zulu_suffix(body: &str) -> bool {
    body.strip_suffix('Z')
        .and_then(|rest| rest.chars().last())
        .is_some_and(|ch| ch.is_ascii_digit())
}
