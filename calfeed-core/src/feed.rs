//! Fetching raw feed text.
//!
//! A feed is either a remote URL (http, https or webcal) or a local .ics
//! file. Fetching never parses anything; it only reports whether text
//! arrived.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{CalFeedError, CalFeedResult};
use crate::event::EventRecord;
use crate::ics::extract;

const USER_AGENT: &str = concat!("calfeed/", env!("CARGO_PKG_VERSION"));

/// Where the calendar feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(Url),
    File(PathBuf),
}

impl FeedSource {
    /// Interpret a user-supplied feed location.
    ///
    /// `webcal://` subscriptions are fetched over https. Anything that is not
    /// a URL is treated as a file path, with `~` expanded.
    pub fn parse(s: &str) -> CalFeedResult<Self> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix("webcal://") {
            return parse_url(&format!("https://{rest}")).map(FeedSource::Url);
        }

        if s.starts_with("http://") || s.starts_with("https://") {
            return parse_url(s).map(FeedSource::Url);
        }

        let path = shellexpand::tilde(s).into_owned();
        Ok(FeedSource::File(PathBuf::from(path)))
    }

    /// Fetch the raw feed text. An empty feed is a success.
    pub async fn fetch(&self, timeout: Duration) -> CalFeedResult<String> {
        match self {
            FeedSource::Url(url) => fetch_url(url, timeout).await,
            FeedSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| CalFeedError::Fetch {
                        feed: self.to_string(),
                        reason: e.to_string(),
                    })
            }
        }
    }

    /// Fetch the feed and extract its events.
    ///
    /// A fetch failure is logged with the feed as context and comes back as
    /// `CalFeedError::NoFeedText`.
    pub async fn load_events(&self, timeout: Duration) -> CalFeedResult<Vec<EventRecord>> {
        let raw = self
            .fetch(timeout)
            .await
            .inspect_err(|e| tracing::error!(feed = %self, error = %e, "Failed to fetch iCalendar data"))
            .ok();

        let events = extract(raw.as_deref())?;
        tracing::info!(feed = %self, count = events.len(), "Loaded events");

        Ok(events)
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => write!(f, "{}", url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn parse_url(s: &str) -> CalFeedResult<Url> {
    Url::parse(s).map_err(|e| CalFeedError::Config(format!("Invalid feed URL '{}': {}", s, e)))
}

async fn fetch_url(url: &Url, timeout: Duration) -> CalFeedResult<String> {
    let fail = |reason: String| CalFeedError::Fetch {
        feed: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| fail(e.to_string()))?;

    tracing::debug!(%url, "Fetching feed");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| fail(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fail(format!("HTTP {}", status)));
    }

    response.text().await.map_err(|e| fail(e.to_string()))
}
