use anyhow::Result;
use calfeed_core::config::CalFeedConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalFeedConfig) -> Result<()> {
    let config_path = CalFeedConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }
    if config.feed_url.is_none() {
        println!("  {}", "feed_url is not set".yellow());
    }

    Ok(())
}
