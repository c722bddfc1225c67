use cloudmap_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Needs a subscriber in place, so call it after `init_logging`.
pub fn log_config_summary(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        query_timeout_ms = config.dns.query_timeout,
        max_concurrent_lookups = config.dns.max_concurrent_lookups,
        feed_sources = config.feeds.sources.len(),
        cache_file = %config.feeds.cache_file,
        "Configuration loaded"
    );
}
