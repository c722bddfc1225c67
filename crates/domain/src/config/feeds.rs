use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a provider's published range feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// AWS `ip-ranges.json`: `prefixes[].ip_prefix` and `ipv6_prefixes[].ipv6_prefix`
    Aws,
    /// Plain text, one CIDR per line (Cloudflare `ips-v4` / `ips-v6`)
    Lines,
    /// Azure service tags: `values[].properties.addressPrefixes`
    Azure,
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aws => write!(f, "aws"),
            Self::Lines => write!(f, "lines"),
            Self::Azure => write!(f, "azure"),
        }
    }
}

/// One feed to fetch when refreshing the provider table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSource {
    /// Provider name recorded for every range in this feed (e.g., "AWS")
    pub provider: String,

    pub url: String,

    pub format: FeedFormat,
}

impl FeedSource {
    pub fn new(provider: &str, url: &str, format: FeedFormat) -> Self {
        Self {
            provider: provider.to_string(),
            url: url.to_string(),
            format,
        }
    }
}

/// Provider feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedsConfig {
    /// Local copy of the merged table, read when not refreshing
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// HTTP timeout per feed, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,

    #[serde(default = "default_sources")]
    pub sources: Vec<FeedSource>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            fetch_timeout: default_fetch_timeout(),
            sources: default_sources(),
        }
    }
}

fn default_cache_file() -> String {
    "ip-ranges.json".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "AWS",
            "https://ip-ranges.amazonaws.com/ip-ranges.json",
            FeedFormat::Aws,
        ),
        FeedSource::new(
            "Cloudflare",
            "https://www.cloudflare.com/ips-v4",
            FeedFormat::Lines,
        ),
        FeedSource::new(
            "Cloudflare",
            "https://www.cloudflare.com/ips-v6",
            FeedFormat::Lines,
        ),
        FeedSource::new(
            "Azure",
            "https://download.microsoft.com/download/7/1/D/71D86715-5596-4529-9B13-DA13A5DE5B63/ServiceTags_Public_20221212.json",
            FeedFormat::Azure,
        ),
    ]
}
