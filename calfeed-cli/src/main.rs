mod commands;
mod render;
mod utils;

use anyhow::Result;
use calfeed_core::config::CalFeedConfig;
use calfeed_core::feed::FeedSource;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calfeed")]
#[command(about = "Read an iCalendar feed and list its events")]
struct Cli {
    /// Feed URL or .ics file (overrides feed_url from the config)
    #[arg(long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print events as JSON
    Events {
        /// Only events in this month (name or number)
        #[arg(short, long)]
        month: Option<String>,

        /// Year for --month (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Only events on this day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "year"])]
        date: Option<String>,

        /// Only events from today on, in date order
        #[arg(long)]
        upcoming: bool,
    },
    /// Print the flyer listing for a month
    Flyer {
        /// Month name or number (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Uncolored text, ready to paste into a post
        #[arg(long)]
        plain: bool,
    },
    /// List upcoming events grouped by month
    Upcoming,
    /// Show the config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = CalFeedConfig::load()?;

    match cli.command {
        Commands::Events {
            month,
            year,
            date,
            upcoming,
        } => {
            let source = resolve_source(cli.source.as_deref(), &config)?;
            commands::events::run(&source, &config, month, year, date, upcoming).await
        }
        Commands::Flyer { month, year, plain } => {
            let source = resolve_source(cli.source.as_deref(), &config)?;
            commands::flyer::run(&source, &config, month, year, plain).await
        }
        Commands::Upcoming => {
            let source = resolve_source(cli.source.as_deref(), &config)?;
            commands::upcoming::run(&source, &config).await
        }
        Commands::Config => commands::config::run(&config),
    }
}

fn resolve_source(source: Option<&str>, config: &CalFeedConfig) -> Result<FeedSource> {
    let source = match source {
        Some(s) => FeedSource::parse(s)?,
        None => config.feed_source()?,
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_date_conflicts_with_month() {
        let result = Cli::try_parse_from(["calfeed", "events", "--date", "2025-07-11", "--month", "July"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_source_is_global() {
        let cli = Cli::try_parse_from(["calfeed", "flyer", "--source", "./events.ics", "-m", "7"]).unwrap();
        assert_eq!(cli.source.as_deref(), Some("./events.ics"));
        assert!(matches!(cli.command, Commands::Flyer { month: Some(_), year: None, plain: false }));
    }

    #[test]
    fn test_source_argument_wins_over_config() {
        let config = CalFeedConfig {
            feed_url: Some("https://cloud.example.org/cal.ics".to_string()),
            ..CalFeedConfig::default()
        };

        let source = resolve_source(Some("./events.ics"), &config).unwrap();
        assert!(matches!(source, FeedSource::File(_)));

        let source = resolve_source(None, &config).unwrap();
        assert!(matches!(source, FeedSource::Url(_)));

        assert!(resolve_source(None, &CalFeedConfig::default()).is_err());
    }
}
