use super::DomainError;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// Published address space of one cloud provider (or one slice of it).
///
/// A provider may appear in several ranges, e.g. one per address family or
/// one per service tag.
#[derive(Debug, Clone)]
pub struct ProviderRange {
    pub provider: Arc<str>,
    pub cidrs: Vec<IpNetwork>,
}

impl ProviderRange {
    /// Parse every CIDR up front. One malformed entry rejects the whole range,
    /// so lookups against a loaded table can never fail.
    pub fn parse<S: AsRef<str>>(provider: &str, cidrs: &[S]) -> Result<Self, DomainError> {
        if provider.trim().is_empty() {
            return Err(DomainError::ConfigurationError(
                "Provider name cannot be empty".to_string(),
            ));
        }

        let mut networks = Vec::with_capacity(cidrs.len());
        for cidr in cidrs {
            let cidr = cidr.as_ref().trim();
            Self::validate_cidr(cidr).map_err(|e| {
                DomainError::ConfigurationError(format!("{provider}: {e}"))
            })?;
            let network: IpNetwork = cidr.parse().map_err(|e| {
                DomainError::ConfigurationError(format!("{provider}: invalid CIDR {cidr}: {e}"))
            })?;
            networks.push(network);
        }

        Ok(Self {
            provider: Arc::from(provider.trim()),
            cidrs: networks,
        })
    }

    pub fn validate_cidr(cidr: &str) -> Result<(), String> {
        if cidr.is_empty() {
            return Err("CIDR cannot be empty".to_string());
        }

        if !cidr.contains('/') {
            return Err(format!(
                "CIDR must include prefix (e.g., 192.168.1.0/24), got {cidr}"
            ));
        }

        Ok(())
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.cidrs.iter().any(|network| network.contains(ip))
    }
}

/// Immutable provider → CIDR table, kept in load order.
#[derive(Debug, Clone, Default)]
pub struct ProviderTable {
    ranges: Vec<ProviderRange>,
}

impl ProviderTable {
    pub fn new(ranges: Vec<ProviderRange>) -> Self {
        Self { ranges }
    }

    /// Build from the plain `provider → [cidr]` mapping a feed loader hands over.
    pub fn from_mapping<P, S>(entries: Vec<(P, Vec<S>)>) -> Result<Self, DomainError>
    where
        P: AsRef<str>,
        S: AsRef<str>,
    {
        let ranges = entries
            .iter()
            .map(|(provider, cidrs)| ProviderRange::parse(provider.as_ref(), cidrs))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ranges })
    }

    /// Concatenate independently produced range lists, in the order given.
    pub fn merge(batches: Vec<Vec<ProviderRange>>) -> Self {
        let ranges = batches.into_iter().flatten().collect();
        Self { ranges }
    }

    /// First provider (in load order) whose ranges contain `ip`.
    pub fn find_provider(&self, ip: IpAddr) -> Option<&Arc<str>> {
        self.ranges
            .iter()
            .find(|range| range.contains(ip))
            .map(|range| &range.provider)
    }

    pub fn ranges(&self) -> &[ProviderRange] {
        &self.ranges
    }

    /// Distinct provider names, first-seen order.
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for range in &self.ranges {
            if !names.contains(&range.provider.as_ref()) {
                names.push(&range.provider);
            }
        }
        names
    }

    pub fn cidr_count(&self) -> usize {
        self.ranges.iter().map(|r| r.cidrs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cidr_count() == 0
    }

    pub fn to_file(&self) -> ProviderTableFile {
        ProviderTableFile {
            services: self
                .ranges
                .iter()
                .map(|range| ProviderRecord {
                    name: range.provider.to_string(),
                    ip_range: range.cidrs.iter().map(|n| n.to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn from_file(file: ProviderTableFile) -> Result<Self, DomainError> {
        let ranges = file
            .services
            .iter()
            .map(|record| ProviderRange::parse(&record.name, &record.ip_range))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ranges })
    }
}

/// On-disk shape of the cached table: `{"Services":[{"Name":..,"IPRange":[..]}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderTableFile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub services: Vec<ProviderRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IPRange", default, deserialize_with = "null_as_empty")]
    pub ip_range: Vec<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
