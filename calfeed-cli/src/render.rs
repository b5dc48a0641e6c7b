//! TUI rendering traits for calfeed types.
//!
//! This module provides an extension trait that adds colored terminal
//! rendering to calfeed-core types using owo_colors.

use calfeed_core::EventRecord;
use calfeed_core::listing::{ListingEntry, time_range};
use calfeed_core::select::MonthGroup;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ListingEntry {
    fn render(&self) -> String {
        let mut lines = vec![self.heading.bold().to_string()];

        if let Some(time) = &self.time {
            lines.push(format!("    {} {}", "Time:".dimmed(), time));
        }
        if let Some(location) = &self.location {
            lines.push(format!("    {} {}", "Location:".dimmed(), location));
        }
        if let Some(description) = &self.description {
            lines.push(description.italic().to_string());
        }

        lines.join("\n")
    }
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let date = self.date.format("%a %b %-d").to_string();
        let time = format!("{:>19}", time_range(self));
        let time = if self.is_all_day() {
            time.dimmed().italic().to_string()
        } else {
            time.dimmed().to_string()
        };

        let mut line = format!("{}  {}  {}", date, time, self.summary);
        if !self.location.trim().is_empty() {
            line.push_str(&format!(" {}", format!("@ {}", self.location.trim()).dimmed()));
        }
        line
    }
}

impl Render for MonthGroup {
    fn render(&self) -> String {
        let mut lines = vec![format!("📅 {}", self.label).bold().to_string()];
        lines.extend(self.events.iter().map(|e| format!("  {}", e.render())));
        lines.join("\n")
    }
}
