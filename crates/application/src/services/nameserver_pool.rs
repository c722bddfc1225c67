use cloudmap_domain::DomainError;
use std::sync::Arc;

/// Read-only list of nameservers with uniform random selection.
///
/// Draws come from `fastrand`'s thread-local generator, so concurrent tasks
/// pick without sharing any lock.
#[derive(Debug, Clone)]
pub struct NameserverPool {
    servers: Arc<[Arc<str>]>,
}

impl NameserverPool {
    pub fn new<S: AsRef<str>>(servers: &[S]) -> Result<Self, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::ConfigurationError(
                "At least one nameserver must be supplied".to_string(),
            ));
        }

        let mut entries: Vec<Arc<str>> = Vec::with_capacity(servers.len());
        for server in servers {
            let server = server.as_ref().trim();
            if server.is_empty() {
                return Err(DomainError::ConfigurationError(
                    "Nameserver entries cannot be blank".to_string(),
                ));
            }
            entries.push(Arc::from(server));
        }

        Ok(Self {
            servers: Arc::from(entries),
        })
    }

    /// One nameserver, chosen uniformly at random.
    pub fn pick(&self) -> Arc<str> {
        let idx = fastrand::usize(..self.servers.len());
        Arc::clone(&self.servers[idx])
    }

    pub fn servers(&self) -> &[Arc<str>] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
