//! Text content of the monthly flyer.
//!
//! Each event becomes a heading plus optional detail lines. Details that
//! match the group's regular meeting time or place are left out, since the
//! flyer states those once at the top.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};

use crate::event::EventRecord;

const ALL_DAY: &str = "All-day event";

/// Regular meeting details that individual entries don't repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDefaults {
    /// e.g. "5:30 PM - 7:00 PM"
    pub regular_time: Option<String>,
    pub regular_location: Option<String>,
}

/// One event as it appears on the flyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// "Friday the 11th - Game Night"
    pub heading: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl ListingEntry {
    pub fn from_event(event: &EventRecord, defaults: &ListingDefaults) -> Self {
        let time = time_range(event);
        let time = match &defaults.regular_time {
            Some(regular) if *regular == time => None,
            _ => Some(time),
        };

        let trimmed = event.location.trim();
        let location = match &defaults.regular_location {
            _ if trimmed.is_empty() => None,
            Some(regular) if regular.trim() == trimmed => None,
            _ => Some(event.location.clone()),
        };

        let description = (!event.description.is_empty()).then(|| event.description.clone());

        ListingEntry {
            heading: format!("{} - {}", day_label(event.date), event.summary),
            time,
            location,
            description,
        }
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        if let Some(time) = &self.time {
            writeln!(f, "    Time: {}", time)?;
        }
        if let Some(location) = &self.location {
            writeln!(f, "    Location: {}", location)?;
        }
        if let Some(description) = &self.description {
            writeln!(f, "{}", description)?;
        }
        Ok(())
    }
}

/// Listing entries for a month's (already selected and sorted) events.
pub fn listing(events: &[EventRecord], defaults: &ListingDefaults) -> Vec<ListingEntry> {
    events
        .iter()
        .map(|e| ListingEntry::from_event(e, defaults))
        .collect()
}

/// "5:30 PM - 7:00 PM", "5:30 PM" without an end, or "All-day event".
pub fn time_range(event: &EventRecord) -> String {
    match (event.start_time, event.end_time) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(start), None) => start.to_string(),
        (None, _) => ALL_DAY.to_string(),
    }
}

/// "Friday the 11th"
pub fn day_label(date: NaiveDate) -> String {
    let day = date.day();
    format!("{} the {}{}", date.format("%A"), day, ordinal_suffix(day))
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Flyer title, e.g. "July 2025".
pub fn flyer_title(month: Month, year: i32) -> String {
    format!("{} {}", month.name(), year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TimeOfDay;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> Option<TimeOfDay> {
        Some(TimeOfDay::new(NaiveTime::from_hms_opt(h, m, 0).unwrap()))
    }

    fn event() -> EventRecord {
        EventRecord {
            summary: "Game Night".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 11).unwrap(),
            description: String::new(),
            location: String::new(),
            start_time: at(17, 30),
            end_time: at(19, 0),
        }
    }

    fn defaults() -> ListingDefaults {
        ListingDefaults {
            regular_time: Some("5:30 PM - 7:00 PM".to_string()),
            regular_location: Some("128 S. Union Ave, Pueblo, CO 81003".to_string()),
        }
    }

    #[test]
    fn test_ordinal_suffixes() {
        let suffixes: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 30, 31]
            .into_iter()
            .map(ordinal_suffix)
            .collect();
        assert_eq!(
            suffixes,
            vec!["st", "nd", "rd", "th", "th", "th", "th", "st", "nd", "rd", "th", "st"]
        );
    }

    #[test]
    fn test_day_label() {
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2025, 7, 11).unwrap()),
            "Friday the 11th"
        );
        assert_eq!(
            day_label(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
            "Friday the 1st"
        );
    }

    #[test]
    fn test_regular_time_and_location_are_omitted() {
        let mut e = event();
        e.location = " 128 S. Union Ave, Pueblo, CO 81003 ".to_string();

        let entry = ListingEntry::from_event(&e, &defaults());
        assert_eq!(entry.heading, "Friday the 11th - Game Night");
        assert_eq!(entry.time, None);
        assert_eq!(entry.location, None);
        assert_eq!(entry.description, None);
    }

    #[test]
    fn test_irregular_details_are_shown() {
        let mut e = event();
        e.start_time = at(18, 0);
        e.location = "Mineral Palace Park".to_string();
        e.description = "Bring a blanket".to_string();

        let entry = ListingEntry::from_event(&e, &defaults());
        assert_eq!(entry.time.as_deref(), Some("6:00 PM - 7:00 PM"));
        assert_eq!(entry.location.as_deref(), Some("Mineral Palace Park"));
        assert_eq!(entry.description.as_deref(), Some("Bring a blanket"));

        assert_eq!(
            entry.to_string(),
            "Friday the 11th - Game Night\n    Time: 6:00 PM - 7:00 PM\n    Location: Mineral Palace Park\nBring a blanket\n"
        );
    }

    #[test]
    fn test_all_day_event_time() {
        let mut e = event();
        e.start_time = None;
        assert_eq!(time_range(&e), "All-day event");

        let entry = ListingEntry::from_event(&e, &defaults());
        assert_eq!(entry.time.as_deref(), Some("All-day event"));

        e.start_time = at(9, 0);
        e.end_time = None;
        assert_eq!(time_range(&e), "9:00 AM");
    }

    #[test]
    fn test_without_defaults_everything_is_shown() {
        let entry = ListingEntry::from_event(&event(), &ListingDefaults::default());
        assert_eq!(entry.time.as_deref(), Some("5:30 PM - 7:00 PM"));
        assert_eq!(entry.location, None);
    }

    #[test]
    fn test_flyer_title() {
        assert_eq!(flyer_title(Month::July, 2025), "July 2025");
    }
}
