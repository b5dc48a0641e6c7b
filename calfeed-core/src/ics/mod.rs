//! Event extraction from iCalendar feeds.
//!
//! This is a tolerant, line-oriented reader rather than an RFC 5545 parser:
//! it only looks at VEVENT blocks and five properties (SUMMARY, DTSTART,
//! DTEND, DESCRIPTION, LOCATION), and skips anything it cannot make sense of.

mod parse;
mod value;

pub use parse::{extract, parse_events};
pub use value::{parse_date, parse_time, unescape_text, unfold};
