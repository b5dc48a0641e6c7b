//! Line unfolding, text unescaping and DTSTART/DTEND value normalization.

use chrono::{NaiveDate, NaiveDateTime};

use crate::event::TimeOfDay;

/// A folded line continues after CRLF followed by exactly one space.
const FOLD: &str = "\r\n ";

/// Separator between the date and time parts of a DATE-TIME value
const TIME_SEPARATOR: char = 'T';

const DATE_FORMATS: &[&str] = &["%Y%m%d", "%Y-%m-%d"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Rejoin folded lines by removing every CRLF + space sequence.
///
/// Only the exact CRLF + single space marker is treated as a fold. A bare LF
/// followed by a space is left alone.
pub fn unfold(content: &str) -> String {
    content.replace(FOLD, "")
}

/// Decode the `\n`, `\,` and `\;` escapes used in TEXT values.
pub fn unescape_text(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
}

/// Parse the date portion of a DTSTART/DTEND value.
///
/// `20250711` and `20250711T173000` both yield 2025-07-11. Returns `None` if
/// the part before the time separator is not a date in one of the accepted
/// layouts, including short fields such as `2025071`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = match value.find(TIME_SEPARATOR) {
        Some(idx) => &value[..idx],
        None => value,
    };

    // chrono accepts single-digit %m/%d, so require the input to be the
    // zero-padded form of the date it parsed to
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(date_part, fmt)
            .ok()
            .filter(|date| date.format(fmt).to_string() == date_part)
    })
}

/// Parse the time of day of a DTSTART/DTEND value.
///
/// Date-only values (all-day events) have no time and yield `None`, as do
/// values that fail to parse. A trailing `Z` is accepted, but the wall-clock
/// time is returned as written.
pub fn parse_time(value: &str) -> Option<TimeOfDay> {
    if !value.contains(TIME_SEPARATOR) {
        return None;
    }

    let value = value.trim_end_matches(['Z', 'z']);

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| TimeOfDay::new(dt.time()))
}
