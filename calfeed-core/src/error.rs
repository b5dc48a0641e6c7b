//! Error types for calfeed.

use thiserror::Error;

/// Errors that can occur in calfeed operations.
#[derive(Error, Debug)]
pub enum CalFeedError {
    /// The feed text never arrived. Distinct from a feed with no events.
    #[error("Failed to fetch iCalendar data")]
    NoFeedText,

    #[error("Could not fetch feed {feed}: {reason}")]
    Fetch { feed: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid month '{0}'. Expected a month name (e.g. \"July\") or a number 1-12")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalFeedError {
    /// Whether the error came from the feed not being available, as opposed
    /// to bad input. Callers may retry these.
    pub fn is_feed_unavailable(&self) -> bool {
        matches!(self, CalFeedError::NoFeedText | CalFeedError::Fetch { .. })
    }
}

/// Result type alias for calfeed operations.
pub type CalFeedResult<T> = Result<T, CalFeedError>;
