use std::sync::Arc;

use anyhow::Result;
use calfeed_core::EventRecord;
use calfeed_core::config::CalFeedConfig;
use calfeed_core::feed::FeedSource;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config: Arc<CalFeedConfig>,
    source: FeedSource,
}

impl AppState {
    pub fn new(config: CalFeedConfig) -> Result<Self> {
        // Fail at startup rather than on the first request
        let source = config.feed_source()?;
        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: CalFeedConfig, source: FeedSource) -> Self {
        AppState {
            config: Arc::new(config),
            source,
        }
    }

    /// Fetch the feed fresh for each request, so calendar edits show up
    /// without a restart.
    pub async fn load_events(&self) -> Result<Vec<EventRecord>> {
        Ok(self.source.load_events(self.config.fetch_timeout()).await?)
    }
}
