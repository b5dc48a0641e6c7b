//! The normalized event record produced from a calendar feed.
//!
//! Consumers (JSON endpoint, flyer listing, upcoming overview) work
//! exclusively with these records, never with raw feed lines.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 12-hour clock without a leading zero, e.g. "5:30 PM"
const CLOCK_FORMAT: &str = "%-I:%M %p";

/// A single calendar event, as extracted from a VEVENT block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub summary: String,
    /// Date portion of DTSTART
    pub date: NaiveDate,
    pub description: String,
    pub location: String,
    /// Set only when DTSTART carried a time of day
    pub start_time: Option<TimeOfDay>,
    /// Set only when DTEND carried a time of day
    pub end_time: Option<TimeOfDay>,
}

impl EventRecord {
    /// All-day events carry no start time.
    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none()
    }
}

/// Time of day rendered on a 12-hour clock with an AM/PM marker.
///
/// Held at minute precision, so two values are equal exactly when they
/// display the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Truncates seconds (and leap seconds) away.
    pub fn new(time: NaiveTime) -> Self {
        TimeOfDay(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLOCK_FORMAT))
    }
}

impl FromStr for TimeOfDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%I:%M %p").map(TimeOfDay)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
