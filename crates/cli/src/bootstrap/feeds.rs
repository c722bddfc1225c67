use anyhow::Context;
use cloudmap_application::ports::ProviderFeedSource;
use cloudmap_application::use_cases::LoadProviderTableUseCase;
use cloudmap_domain::{Config, ProviderTable};
use cloudmap_infrastructure::feeds::http_source::build_client;
use cloudmap_infrastructure::feeds::{HttpFeedSource, JsonFileProviderStore};
use std::sync::Arc;
use std::time::Duration;

/// Refresh the provider table from the configured feeds, or read the cached copy.
pub async fn load_provider_table(config: &Config, refresh: bool) -> anyhow::Result<ProviderTable> {
    let client = build_client(Duration::from_secs(config.feeds.fetch_timeout))?;

    let sources: Vec<Arc<dyn ProviderFeedSource>> = config
        .feeds
        .sources
        .iter()
        .cloned()
        .map(|source| {
            Arc::new(HttpFeedSource::new(source, client.clone())) as Arc<dyn ProviderFeedSource>
        })
        .collect();

    let store = Arc::new(JsonFileProviderStore::new(&config.feeds.cache_file));
    let use_case = LoadProviderTableUseCase::new(sources, store);

    if refresh {
        Ok(use_case.refresh().await?)
    } else {
        use_case
            .load_stored()
            .await
            .context("no usable provider table; run with --update to download the ranges")
    }
}
