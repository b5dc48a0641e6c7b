pub mod config;
pub mod events;
pub mod flyer;
pub mod upcoming;

use anyhow::Result;
use calfeed_core::EventRecord;
use calfeed_core::config::CalFeedConfig;
use calfeed_core::feed::FeedSource;

use crate::utils::tui::create_spinner;

/// Fetch and extract the feed behind a spinner.
pub async fn load_events(source: &FeedSource, config: &CalFeedConfig) -> Result<Vec<EventRecord>> {
    tracing::debug!(%source, "Loading events");
    let spinner = create_spinner(format!("Fetching {}", source));
    let result = source.load_events(config.fetch_timeout()).await;
    spinner.finish_and_clear();

    Ok(result?)
}

/// Today in the local timezone.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
