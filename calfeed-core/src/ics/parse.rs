//! VEVENT block scanning.

use chrono::NaiveDate;

use crate::error::{CalFeedError, CalFeedResult};
use crate::event::{EventRecord, TimeOfDay};
use crate::ics::value::{parse_date, parse_time, unescape_text, unfold};

const BEGIN_VEVENT: &str = "BEGIN:VEVENT";
const END_VEVENT: &str = "END:VEVENT";

/// Characters stripped from both ends of every line.
const LINE_PADDING: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Extract events from fetched feed text.
///
/// `None` means the feed was never fetched and is reported as
/// `CalFeedError::NoFeedText`. Text without any VEVENT (including empty
/// text) is a successful, empty result.
pub fn extract(raw: Option<&str>) -> CalFeedResult<Vec<EventRecord>> {
    let content = raw.ok_or(CalFeedError::NoFeedText)?;
    Ok(parse_events(content))
}

/// Extract every complete VEVENT from `content`, in source order.
///
/// Blocks that never get a usable DTSTART date are dropped. Lines that do not
/// look like `KEY:VALUE`, and values that fail to parse, are skipped.
pub fn parse_events(content: &str) -> Vec<EventRecord> {
    let unfolded = unfold(content);

    let mut events = Vec::new();
    let mut current: Option<EventBuilder> = None;
    let mut discarded = 0usize;

    for line in unfolded.split('\n') {
        let line = line.trim_matches(LINE_PADDING);

        if line.starts_with(BEGIN_VEVENT) {
            if current.is_some() {
                tracing::debug!("VEVENT started before the previous one ended, replacing it");
            }
            current = Some(EventBuilder::default());
        } else if line.starts_with(END_VEVENT) {
            let Some(builder) = current.take() else {
                continue;
            };
            match builder.finish() {
                Some(event) => events.push(event),
                None => {
                    discarded += 1;
                    tracing::debug!("Discarding VEVENT without a usable DTSTART date");
                }
            }
        } else if let Some(builder) = current.as_mut() {
            builder.apply(line);
        }
    }

    if current.is_some() {
        tracing::debug!("Feed ended inside an unterminated VEVENT");
    }

    tracing::debug!(events = events.len(), discarded, "Extracted events from feed");
    events
}

/// In-progress event between BEGIN:VEVENT and END:VEVENT.
#[derive(Debug, Default)]
struct EventBuilder {
    summary: String,
    date: Option<NaiveDate>,
    description: String,
    location: String,
    start_time: Option<TimeOfDay>,
    end_time: Option<TimeOfDay>,
}

impl EventBuilder {
    /// Apply one `KEY;PARAMS:VALUE` line.
    ///
    /// Keys are matched by prefix so that parameters such as
    /// `DTSTART;VALUE=DATE` still hit DTSTART. A repeated property replaces
    /// the earlier value.
    fn apply(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };

        if key.starts_with("SUMMARY") {
            self.summary = value.to_string();
        } else if key.starts_with("DTSTART") {
            self.date = parse_date(value);
            self.start_time = parse_time(value);
            if self.date.is_none() {
                tracing::debug!(value, "Unparseable DTSTART date");
            }
        } else if key.starts_with("DTEND") {
            self.end_time = parse_time(value);
        } else if key.starts_with("DESCRIPTION") {
            self.description = value.to_string();
        } else if key.starts_with("LOCATION") {
            self.location = value.to_string();
        }
    }

    /// Turn the builder into a record, or `None` if it never got a date.
    /// Text fields are unescaped only here.
    fn finish(self) -> Option<EventRecord> {
        let date = self.date?;

        Some(EventRecord {
            summary: unescape_text(&self.summary),
            date,
            description: unescape_text(&self.description),
            location: unescape_text(&self.location),
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }
}
