use anyhow::Result;
use calfeed_core::config::CalFeedConfig;
use calfeed_core::feed::FeedSource;
use calfeed_core::listing::{ListingDefaults, ListingEntry, flyer_title, listing};
use calfeed_core::select::{current_month, in_month, parse_month};
use chrono::Datelike;
use owo_colors::OwoColorize;

use super::{load_events, today};
use crate::render::Render;

const NO_EVENTS: &str = "No events scheduled for this month.";

pub async fn run(
    source: &FeedSource,
    config: &CalFeedConfig,
    month: Option<String>,
    year: Option<i32>,
    plain: bool,
) -> Result<()> {
    let today = today();
    let month = match month.as_deref() {
        Some(m) => parse_month(m)?,
        None => current_month(today),
    };
    let year = year.unwrap_or_else(|| today.year());

    let events = load_events(source, config).await?;
    let this_month = in_month(&events, month, year);

    let title = flyer_title(month, year);
    let defaults = config.listing_defaults();
    let entries = listing(&this_month, &defaults);

    if plain {
        print!("{}", plain_text(&title, &defaults, &entries));
        return Ok(());
    }

    println!("{}", title.bold());
    if let Some(notice) = regular_notice(&defaults) {
        println!("{}", notice.dimmed());
    }
    println!();

    if entries.is_empty() {
        println!("{}", NO_EVENTS.dimmed());
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.render());
    }

    Ok(())
}

fn regular_notice(defaults: &ListingDefaults) -> Option<String> {
    let location = defaults.regular_location.as_ref()?;
    let when = defaults.regular_time.as_deref().unwrap_or("the usual time");
    Some(format!(
        "Unless otherwise noted, all events are at {}, {}",
        location, when
    ))
}

/// The flyer as plain text, one blank line between entries.
fn plain_text(title: &str, defaults: &ListingDefaults, entries: &[ListingEntry]) -> String {
    let mut out = format!("{}\n", title);
    if let Some(notice) = regular_notice(defaults) {
        out.push_str(&notice);
        out.push('\n');
    }
    out.push('\n');

    if entries.is_empty() {
        out.push_str(NO_EVENTS);
        out.push('\n');
        return out;
    }

    let blocks: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
    out.push_str(&blocks.join("\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ListingDefaults {
        ListingDefaults {
            regular_time: Some("5:30 PM - 7:00 PM".to_string()),
            regular_location: Some("Colorado Wins".to_string()),
        }
    }

    #[test]
    fn test_plain_text_lists_entries() {
        let entries = vec![
            ListingEntry {
                heading: "Friday the 11th - Game Night".to_string(),
                time: None,
                location: None,
                description: Some("Bring a friend".to_string()),
            },
            ListingEntry {
                heading: "Friday the 25th - Picnic".to_string(),
                time: Some("All-day event".to_string()),
                location: Some("Mineral Palace Park".to_string()),
                description: None,
            },
        ];

        let text = plain_text("July 2025", &defaults(), &entries);
        assert_eq!(
            text,
            "July 2025\n\
             Unless otherwise noted, all events are at Colorado Wins, 5:30 PM - 7:00 PM\n\
             \n\
             Friday the 11th - Game Night\n\
             Bring a friend\n\
             \n\
             Friday the 25th - Picnic\n    \
             Time: All-day event\n    \
             Location: Mineral Palace Park\n"
        );
    }

    #[test]
    fn test_plain_text_without_events() {
        let text = plain_text("July 2025", &ListingDefaults::default(), &[]);
        assert_eq!(text, "July 2025\n\nNo events scheduled for this month.\n");
    }
}
