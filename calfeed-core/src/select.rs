//! Choosing which events a consumer shows.
//!
//! Extraction keeps feed order; every chronological ordering happens here.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;

use crate::error::{CalFeedError, CalFeedResult};
use crate::event::EventRecord;

/// Parse a month given as a name ("July", "jul") or a number ("7").
pub fn parse_month(s: &str) -> CalFeedResult<Month> {
    let s = s.trim();

    if let Ok(n) = s.parse::<u8>() {
        return Month::try_from(n).map_err(|_| CalFeedError::InvalidMonth(s.to_string()));
    }

    Month::from_str(s).map_err(|_| CalFeedError::InvalidMonth(s.to_string()))
}

/// Parse a YYYY-MM-DD day.
pub fn parse_day(s: &str) -> CalFeedResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalFeedError::InvalidDate(s.to_string()))
}

/// Events in the given month, ordered by date.
pub fn in_month(events: &[EventRecord], month: Month, year: i32) -> Vec<EventRecord> {
    let month = month.number_from_month();
    sorted_by_date(
        events
            .iter()
            .filter(|e| e.date.month() == month && e.date.year() == year),
    )
}

/// Events on or after `today`, ordered by date.
pub fn upcoming(events: &[EventRecord], today: NaiveDate) -> Vec<EventRecord> {
    sorted_by_date(events.iter().filter(|e| e.date >= today))
}

/// The first event (in feed order) on `date`.
pub fn on_date(events: &[EventRecord], date: NaiveDate) -> Option<&EventRecord> {
    events.iter().find(|e| e.date == date)
}

/// The earliest event on or after `today`. Ties go to the first in the feed.
pub fn next_upcoming(events: &[EventRecord], today: NaiveDate) -> Option<&EventRecord> {
    events
        .iter()
        .filter(|e| e.date >= today)
        .min_by_key(|e| e.date)
}

fn sorted_by_date<'a>(events: impl Iterator<Item = &'a EventRecord>) -> Vec<EventRecord> {
    let mut events: Vec<EventRecord> = events.cloned().collect();
    events.sort_by_key(|e| e.date);
    events
}

/// Events sharing a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    /// e.g. "July 2025"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub events: Vec<EventRecord>,
}

/// Group events by month, earliest month first. Order within a month is
/// preserved from the input.
pub fn group_by_month(events: &[EventRecord]) -> Vec<MonthGroup> {
    let mut groups: BTreeMap<(i32, u32), MonthGroup> = BTreeMap::new();
    for event in events {
        let (year, month) = (event.date.year(), event.date.month());
        groups
            .entry((year, month))
            .or_insert_with(|| MonthGroup {
                label: event.date.format("%B %Y").to_string(),
                year,
                month,
                events: Vec::new(),
            })
            .events
            .push(event.clone());
    }

    groups.into_values().collect()
}

/// A consumer's choice of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Everything, in feed order
    All,
    Month { month: Month, year: i32 },
    Date(NaiveDate),
    Upcoming { today: NaiveDate },
}

impl Selection {
    /// Build a selection from optional user arguments.
    ///
    /// A date wins over a month; a month or a year alone fills the other
    /// from `today`.
    pub fn from_args(
        month: Option<&str>,
        year: Option<i32>,
        date: Option<&str>,
        upcoming: bool,
        today: NaiveDate,
    ) -> CalFeedResult<Self> {
        if let Some(date) = date {
            return Ok(Selection::Date(parse_day(date)?));
        }

        if month.is_some() || year.is_some() {
            let month = match month {
                Some(m) => parse_month(m)?,
                None => current_month(today),
            };
            return Ok(Selection::Month {
                month,
                year: year.unwrap_or_else(|| today.year()),
            });
        }

        if upcoming {
            return Ok(Selection::Upcoming { today });
        }

        Ok(Selection::All)
    }

    pub fn apply(&self, events: &[EventRecord]) -> Vec<EventRecord> {
        match *self {
            Selection::All => events.to_vec(),
            Selection::Month { month, year } => in_month(events, month, year),
            Selection::Date(date) => events.iter().filter(|e| e.date == date).cloned().collect(),
            Selection::Upcoming { today } => upcoming(events, today),
        }
    }
}

/// The month `today` falls in.
pub fn current_month(today: NaiveDate) -> Month {
    (0..today.month0()).fold(Month::January, |month, _| month.succ())
}
