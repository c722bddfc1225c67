use super::ResolutionFailure;
use std::net::IpAddr;
use std::sync::Arc;

/// One domain pinned to one nameserver.
/// Uses `Arc<str>` so the pair can be moved into a task and echoed back in the result
/// without copying the strings again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameLookupRequest {
    pub domain: Arc<str>,
    pub nameserver: Arc<str>,
}

impl NameLookupRequest {
    pub fn new(domain: impl Into<Arc<str>>, nameserver: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            nameserver: nameserver.into(),
        }
    }
}

/// Outcome of a single lookup. Produced exactly once per request.
#[derive(Debug, Clone)]
pub struct NameLookupResult {
    pub domain: Arc<str>,
    pub nameserver: Arc<str>,
    /// Addresses in the order the nameserver returned them. Empty on failure.
    pub addresses: Vec<IpAddr>,
    pub error: Option<ResolutionFailure>,
    pub elapsed_ms: u64,
}

impl NameLookupResult {
    pub fn resolved(request: &NameLookupRequest, addresses: Vec<IpAddr>, elapsed_ms: u64) -> Self {
        Self {
            domain: Arc::clone(&request.domain),
            nameserver: Arc::clone(&request.nameserver),
            addresses,
            error: None,
            elapsed_ms,
        }
    }

    pub fn failed(
        request: &NameLookupRequest,
        failure: ResolutionFailure,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            domain: Arc::clone(&request.domain),
            nameserver: Arc::clone(&request.nameserver),
            addresses: Vec::new(),
            error: Some(failure),
            elapsed_ms,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.error.is_none()
    }
}
