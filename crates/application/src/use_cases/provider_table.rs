use crate::ports::{ProviderFeedSource, ProviderTableStore};
use cloudmap_domain::{DomainError, ProviderRange, ProviderTable};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Use case: produce the immutable provider table, either by refreshing every
/// configured feed or by reading the stored copy.
pub struct LoadProviderTableUseCase {
    sources: Vec<Arc<dyn ProviderFeedSource>>,
    store: Arc<dyn ProviderTableStore>,
}

impl LoadProviderTableUseCase {
    pub fn new(
        sources: Vec<Arc<dyn ProviderFeedSource>>,
        store: Arc<dyn ProviderTableStore>,
    ) -> Self {
        Self { sources, store }
    }

    pub async fn execute(&self, refresh: bool) -> Result<ProviderTable, DomainError> {
        if refresh {
            self.refresh().await
        } else {
            self.load_stored().await
        }
    }

    /// Fetch all feeds concurrently, merge them in source order, then store the result.
    ///
    /// Every fetch task owns its own range list; the merge happens here, after
    /// the join, on a single task.
    #[instrument(skip(self), fields(sources = self.sources.len()))]
    pub async fn refresh(&self) -> Result<ProviderTable, DomainError> {
        if self.sources.is_empty() {
            return Err(DomainError::ConfigurationError(
                "No provider feed sources configured".to_string(),
            ));
        }

        let fetch_tasks: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                tokio::spawn(async move {
                    info!(provider = %source.provider(), "Fetching IP ranges");
                    source.fetch().await
                })
            })
            .collect();

        let fetch_results = join_all(fetch_tasks).await;

        let mut batches: Vec<Vec<ProviderRange>> = Vec::with_capacity(fetch_results.len());
        let mut first_error: Option<DomainError> = None;

        for (source, result) in self.sources.iter().zip(fetch_results) {
            match result {
                Ok(Ok(ranges)) => {
                    let cidrs: usize = ranges.iter().map(|r| r.cidrs.len()).sum();
                    info!(
                        provider = %source.provider(),
                        ranges = ranges.len(),
                        cidrs,
                        "Feed loaded"
                    );
                    batches.push(ranges);
                }
                Ok(Err(e)) => {
                    error!(provider = %source.provider(), error = %e, "Feed failed");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    error!(provider = %source.provider(), error = %e, "Feed task panicked");
                    first_error.get_or_insert(DomainError::ConfigurationError(format!(
                        "feed task for {} failed: {e}",
                        source.provider()
                    )));
                }
            }
        }

        if let Some(e) = first_error {
            return Err(match e {
                DomainError::ConfigurationError(_) => e,
                other => DomainError::ConfigurationError(other.to_string()),
            });
        }

        let table = ProviderTable::merge(batches);
        if table.is_empty() {
            warn!("Provider feeds returned no ranges");
        }

        self.store.save(&table).await?;

        info!(
            providers = table.providers().len(),
            cidrs = table.cidr_count(),
            "Provider table refreshed"
        );

        Ok(table)
    }

    #[instrument(skip(self))]
    pub async fn load_stored(&self) -> Result<ProviderTable, DomainError> {
        let table = self.store.load().await?;

        info!(
            providers = table.providers().len(),
            cidrs = table.cidr_count(),
            "Provider table loaded"
        );

        Ok(table)
    }
}
