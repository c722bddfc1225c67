use serde::{Deserialize, Serialize};

/// Lookup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Per-lookup timeout in milliseconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Port used when a nameserver is given as a bare host
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on lookups in flight at once (0 = one task per domain, unbounded)
    #[serde(default)]
    pub max_concurrent_lookups: usize,

    /// Re-ask over TCP when a UDP answer comes back truncated
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            port: default_port(),
            max_concurrent_lookups: 0,
            tcp_fallback: true,
        }
    }
}

fn default_query_timeout() -> u64 {
    10_000
}

fn default_port() -> u16 {
    53
}

fn default_true() -> bool {
    true
}
