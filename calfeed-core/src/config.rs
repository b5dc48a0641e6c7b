//! calfeed configuration.
//!
//! Read from ~/.config/calfeed/config.toml, with `CALFEED_*` environment
//! variables taking precedence (e.g. `CALFEED_FEED_URL`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalFeedError, CalFeedResult};
use crate::feed::FeedSource;
use crate::listing::ListingDefaults;

const ENV_PREFIX: &str = "CALFEED";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_PORT: u16 = 4096;

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalFeedConfig {
    /// iCalendar subscription URL (or a local .ics path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Meeting time the flyer doesn't repeat per event, e.g. "5:30 PM - 7:00 PM"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_time: Option<String>,

    /// Meeting place the flyer doesn't repeat per event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_location: Option<String>,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

impl Default for CalFeedConfig {
    fn default() -> Self {
        CalFeedConfig {
            feed_url: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            regular_time: None,
            regular_location: None,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

impl CalFeedConfig {
    pub fn config_path() -> CalFeedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalFeedError::Config("Could not determine config directory".into()))?
            .join("calfeed");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first use.
    pub fn load() -> CalFeedResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalFeedResult<Self> {
        Self::from_sources(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(path: &Path, env: Environment) -> CalFeedResult<Self> {
        let config: CalFeedConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalFeedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalFeedError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalFeedResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalFeedError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, default_config_contents())
            .map_err(|e| CalFeedError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// The configured feed, or an error telling the user how to set one.
    pub fn feed_source(&self) -> CalFeedResult<FeedSource> {
        let url = self.feed_url.as_deref().ok_or_else(|| {
            CalFeedError::Config(format!(
                "No feed configured. Set feed_url in the config file or {}_FEED_URL",
                ENV_PREFIX
            ))
        })?;

        FeedSource::parse(url)
    }

    pub fn listing_defaults(&self) -> ListingDefaults {
        ListingDefaults {
            regular_time: self.regular_time.clone(),
            regular_location: self.regular_location.clone(),
        }
    }

    /// Effective settings as TOML, for display.
    pub fn to_toml(&self) -> CalFeedResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalFeedError::Config(e.to_string()))
    }
}

fn default_config_contents() -> String {
    format!(
        "\
# calfeed configuration

# iCalendar subscription URL (webcal://, https:// or a local .ics file):
# feed_url = \"https://cloud.example.org/remote.php/dav/public-calendars/abc?export\"

# Seconds to wait for the feed before giving up:
# fetch_timeout_secs = {}

# Regular meeting details, left out of individual flyer entries:
# regular_time = \"5:30 PM - 7:00 PM\"
# regular_location = \"128 S. Union Ave, Pueblo, CO 81003\"

# Port for calfeed-server:
# server_port = {}
",
        DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_SERVER_PORT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalFeedConfig::from_sources(&dir.path().join("config.toml"), no_env()).unwrap();

        assert_eq!(config, CalFeedConfig::default());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert!(matches!(config.feed_source(), Err(CalFeedError::Config(_))));
    }

    #[test]
    fn test_default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        CalFeedConfig::create_default_config(&path).unwrap();
        assert!(path.exists());

        let parsed: CalFeedConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, CalFeedConfig::default());
    }

    #[test]
    fn test_load_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "feed_url = \"webcal://cloud.example.org/cal.ics\"\n\
             fetch_timeout_secs = 3\n\
             regular_time = \"5:30 PM - 7:00 PM\"\n",
        )
        .unwrap();

        let config = CalFeedConfig::from_sources(&path, no_env()).unwrap();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
        assert_eq!(config.server_port, 4096);
        assert_eq!(
            config.feed_source().unwrap().to_string(),
            "https://cloud.example.org/cal.ics"
        );

        let defaults = config.listing_defaults();
        assert_eq!(defaults.regular_time.as_deref(), Some("5:30 PM - 7:00 PM"));
        assert_eq!(defaults.regular_location, None);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "feed_url = \"https://a.example.org/cal.ics\"\n").unwrap();

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("CALFEED_FEED_URL".to_string(), "https://b.example.org/cal.ics".to_string()),
            ("CALFEED_SERVER_PORT".to_string(), "8080".to_string()),
        ])));

        let config = CalFeedConfig::from_sources(&path, env).unwrap();
        assert_eq!(config.feed_url.as_deref(), Some("https://b.example.org/cal.ics"));
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fetch_timeout_secs = \"soon\"\n").unwrap();

        let err = CalFeedConfig::from_sources(&path, no_env()).unwrap_err();
        assert!(matches!(err, CalFeedError::Config(_)));
    }

    #[test]
    fn test_to_toml_skips_unset_values() {
        let toml = CalFeedConfig::default().to_toml().unwrap();
        assert!(toml.contains("fetch_timeout_secs = 10"));
        assert!(!toml.contains("feed_url"));
    }
}
