use cloudmap_domain::{ClassificationResult, DomainError, ProviderTable};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::trace;

/// Labels addresses against the loaded provider table.
///
/// The table is shared read-only, so one classifier can serve every lookup
/// task without locking.
pub struct CloudClassifier {
    table: Arc<ProviderTable>,
}

impl CloudClassifier {
    pub fn new(table: Arc<ProviderTable>) -> Self {
        Self { table }
    }

    /// Classify a textual address. Empty or unparsable input is a caller error.
    pub fn classify(&self, address: &str) -> Result<ClassificationResult, DomainError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAddress("empty address".to_string()));
        }

        let ip: IpAddr = trimmed
            .parse()
            .map_err(|_| DomainError::InvalidAddress(trimmed.to_string()))?;

        Ok(self.classify_ip(ip))
    }

    pub fn classify_ip(&self, ip: IpAddr) -> ClassificationResult {
        match self.table.find_provider(ip) {
            Some(provider) => {
                trace!(%ip, provider = %provider, "Address inside provider range");
                ClassificationResult::cloud(ip, Arc::clone(provider))
            }
            None => ClassificationResult::not_cloud(ip),
        }
    }

    pub fn classify_all(&self, addresses: &[IpAddr]) -> Vec<ClassificationResult> {
        addresses.iter().map(|ip| self.classify_ip(*ip)).collect()
    }

    pub fn table(&self) -> &ProviderTable {
        &self.table
    }
}
