//! Core library for calfeed.
//!
//! Turns an iCalendar feed into normalized event records and provides the
//! selection and listing helpers the calfeed front-ends share:
//! - `ics` extracts `EventRecord`s from raw feed text
//! - `feed` fetches that text from a URL or file
//! - `select` and `listing` prepare records for display

pub mod config;
pub mod error;
pub mod event;
pub mod feed;
pub mod ics;
pub mod listing;
pub mod select;

pub use error::{CalFeedError, CalFeedResult};
pub use event::{EventRecord, TimeOfDay};
