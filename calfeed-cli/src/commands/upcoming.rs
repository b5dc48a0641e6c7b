use anyhow::Result;
use calfeed_core::config::CalFeedConfig;
use calfeed_core::feed::FeedSource;
use calfeed_core::select::{group_by_month, upcoming};
use owo_colors::OwoColorize;

use super::{load_events, today};
use crate::render::Render;

pub async fn run(source: &FeedSource, config: &CalFeedConfig) -> Result<()> {
    let events = load_events(source, config).await?;
    let groups = group_by_month(&upcoming(&events, today()));

    if groups.is_empty() {
        println!("{}", "No upcoming events found".dimmed());
        return Ok(());
    }

    let rendered: Vec<String> = groups.iter().map(|g| g.render()).collect();
    println!("{}", rendered.join("\n\n"));

    Ok(())
}
