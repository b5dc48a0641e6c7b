use anyhow::{Context, Result};
use calfeed_core::config::CalFeedConfig;
use calfeed_core::feed::FeedSource;
use calfeed_core::select::Selection;

use super::{load_events, today};

pub async fn run(
    source: &FeedSource,
    config: &CalFeedConfig,
    month: Option<String>,
    year: Option<i32>,
    date: Option<String>,
    upcoming: bool,
) -> Result<()> {
    // Validate arguments before touching the network
    let selection = Selection::from_args(month.as_deref(), year, date.as_deref(), upcoming, today())?;

    let events = load_events(source, config).await?;
    let selected = selection.apply(&events);

    let json = serde_json::to_string_pretty(&selected).context("Failed to serialize events")?;
    println!("{}", json);

    Ok(())
}
