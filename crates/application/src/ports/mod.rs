mod name_resolver;
mod provider_feed;

pub use name_resolver::NameResolver;
pub use provider_feed::{ProviderFeedSource, ProviderTableStore};
