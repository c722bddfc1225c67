use async_trait::async_trait;
use cloudmap_domain::{DomainError, ProviderRange, ProviderTable};

/// One provider feed (AWS JSON, a Cloudflare text list, Azure service tags, ...).
#[async_trait]
pub trait ProviderFeedSource: Send + Sync {
    /// Provider label, for logs.
    fn provider(&self) -> &str;

    /// Fetch and parse the feed into independent ranges. Nothing is shared
    /// between sources; the caller merges.
    async fn fetch(&self) -> Result<Vec<ProviderRange>, DomainError>;
}

/// Where the merged table is kept between runs.
#[async_trait]
pub trait ProviderTableStore: Send + Sync {
    async fn load(&self) -> Result<ProviderTable, DomainError>;

    async fn save(&self, table: &ProviderTable) -> Result<(), DomainError>;
}
