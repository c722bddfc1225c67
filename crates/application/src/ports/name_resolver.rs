use async_trait::async_trait;
use cloudmap_domain::{NameLookupRequest, NameLookupResult};

#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve `request.domain` through `request.nameserver` only.
    ///
    /// Never fails: timeouts, NXDOMAIN and transport errors are carried in
    /// `NameLookupResult::error` with an empty address list.
    async fn resolve(&self, request: &NameLookupRequest) -> NameLookupResult;
}
