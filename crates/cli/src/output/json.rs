use anyhow::Context;
use cloudmap_domain::DomainReport;
use serde::Serialize;
use std::net::IpAddr;
use std::path::Path;

/// One entry of the `-o` output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputRecord {
    Resolved {
        domain: String,
        nameserver: String,
        ip: IpAddr,
        is_cloud: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        provider: Option<String>,
        elapsed_ms: u64,
    },
    Failed {
        domain: String,
        nameserver: String,
        error: String,
        kind: &'static str,
        elapsed_ms: u64,
    },
}

pub fn records_from(report: &DomainReport) -> Vec<OutputRecord> {
    let lookup = &report.lookup;

    if let Some(failure) = &lookup.error {
        return vec![OutputRecord::Failed {
            domain: lookup.domain.to_string(),
            nameserver: lookup.nameserver.to_string(),
            error: failure.to_string(),
            kind: failure.kind(),
            elapsed_ms: lookup.elapsed_ms,
        }];
    }

    report
        .classifications
        .iter()
        .map(|c| OutputRecord::Resolved {
            domain: lookup.domain.to_string(),
            nameserver: lookup.nameserver.to_string(),
            ip: c.address,
            is_cloud: c.is_cloud,
            provider: c.provider.as_ref().map(|p| p.to_string()),
            elapsed_ms: lookup.elapsed_ms,
        })
        .collect()
}

pub fn write_records(path: &Path, records: &[OutputRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write output file {}", path.display()))
}
