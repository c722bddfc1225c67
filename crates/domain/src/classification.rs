use super::NameLookupResult;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub address: IpAddr,
    pub is_cloud: bool,
    pub provider: Option<Arc<str>>,
}

impl ClassificationResult {
    pub fn cloud(address: IpAddr, provider: Arc<str>) -> Self {
        Self {
            address,
            is_cloud: true,
            provider: Some(provider),
        }
    }

    pub fn not_cloud(address: IpAddr) -> Self {
        Self {
            address,
            is_cloud: false,
            provider: None,
        }
    }
}

/// One item of a batch stream: a finished lookup and the labels of its addresses.
#[derive(Debug, Clone)]
pub struct DomainReport {
    pub lookup: NameLookupResult,
    pub classifications: Vec<ClassificationResult>,
}

impl DomainReport {
    pub fn cloud_count(&self) -> usize {
        self.classifications.iter().filter(|c| c.is_cloud).count()
    }
}

/// Totals reported once every lookup of a batch has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub domains: usize,
    pub resolved: usize,
    pub failed: usize,
    pub addresses: usize,
    pub cloud_addresses: usize,
    pub elapsed_ms: u64,
}

impl BatchSummary {
    pub fn record(&mut self, report: &DomainReport) {
        self.domains += 1;
        if report.lookup.is_resolved() {
            self.resolved += 1;
        } else {
            self.failed += 1;
        }
        self.addresses += report.classifications.len();
        self.cloud_addresses += report.cloud_count();
    }
}
