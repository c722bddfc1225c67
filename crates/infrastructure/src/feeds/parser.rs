//! Parsers for the published range feeds.
//!
//! Each feed shape turns a response body into provider ranges tagged with
//! the configured provider name. CIDR validation happens in
//! [`ProviderRange::parse`], so a malformed entry fails the whole feed.

use cloudmap_domain::{DomainError, FeedFormat, ProviderRange};
use serde::Deserialize;

pub trait FeedParser {
    fn parse(&self, provider: &str, body: &str) -> Result<Vec<ProviderRange>, DomainError>;
}

/// Enum-dispatched parser picked from the configured feed format.
pub enum Parser {
    Aws(AwsRangesParser),
    Lines(LineListParser),
    Azure(AzureServiceTagsParser),
}

impl Parser {
    pub fn for_format(format: FeedFormat) -> Self {
        match format {
            FeedFormat::Aws => Self::Aws(AwsRangesParser),
            FeedFormat::Lines => Self::Lines(LineListParser),
            FeedFormat::Azure => Self::Azure(AzureServiceTagsParser),
        }
    }

    pub fn parse(&self, provider: &str, body: &str) -> Result<Vec<ProviderRange>, DomainError> {
        match self {
            Self::Aws(p) => p.parse(provider, body),
            Self::Lines(p) => p.parse(provider, body),
            Self::Azure(p) => p.parse(provider, body),
        }
    }
}

fn json_error(provider: &str, e: serde_json::Error) -> DomainError {
    DomainError::ConfigurationError(format!("{provider}: malformed feed: {e}"))
}

// ---------------------------------------------------------------------------
// AWS ip-ranges.json
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AwsIpRanges {
    #[serde(default)]
    prefixes: Vec<AwsPrefix>,
    #[serde(default)]
    ipv6_prefixes: Vec<AwsIpv6Prefix>,
}

#[derive(Deserialize)]
struct AwsPrefix {
    ip_prefix: String,
}

#[derive(Deserialize)]
struct AwsIpv6Prefix {
    ipv6_prefix: String,
}

/// One range for the IPv4 prefixes, one for the IPv6 prefixes.
pub struct AwsRangesParser;

impl FeedParser for AwsRangesParser {
    fn parse(&self, provider: &str, body: &str) -> Result<Vec<ProviderRange>, DomainError> {
        let feed: AwsIpRanges =
            serde_json::from_str(body).map_err(|e| json_error(provider, e))?;

        let v4: Vec<&str> = feed.prefixes.iter().map(|p| p.ip_prefix.as_str()).collect();
        let v6: Vec<&str> = feed
            .ipv6_prefixes
            .iter()
            .map(|p| p.ipv6_prefix.as_str())
            .collect();

        Ok(vec![
            ProviderRange::parse(provider, &v4)?,
            ProviderRange::parse(provider, &v6)?,
        ])
    }
}

// ---------------------------------------------------------------------------
// Plain text, one CIDR per line
// ---------------------------------------------------------------------------

pub struct LineListParser;

impl FeedParser for LineListParser {
    fn parse(&self, provider: &str, body: &str) -> Result<Vec<ProviderRange>, DomainError> {
        let cidrs: Vec<&str> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        Ok(vec![ProviderRange::parse(provider, &cidrs)?])
    }
}

// ---------------------------------------------------------------------------
// Azure service tags
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AzureServiceTags {
    #[serde(default)]
    values: Vec<AzureServiceTag>,
}

#[derive(Deserialize)]
struct AzureServiceTag {
    #[serde(default)]
    properties: AzureTagProperties,
}

#[derive(Deserialize, Default)]
struct AzureTagProperties {
    #[serde(default, rename = "addressPrefixes")]
    address_prefixes: Vec<String>,
}

/// One range per service tag, all under the configured provider name.
pub struct AzureServiceTagsParser;

impl FeedParser for AzureServiceTagsParser {
    fn parse(&self, provider: &str, body: &str) -> Result<Vec<ProviderRange>, DomainError> {
        let feed: AzureServiceTags =
            serde_json::from_str(body).map_err(|e| json_error(provider, e))?;

        feed.values
            .iter()
            .map(|tag| ProviderRange::parse(provider, &tag.properties.address_prefixes))
            .collect()
    }
}
