use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid nameserver '{nameserver}': {reason}")]
    InvalidNameserver { nameserver: String, reason: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout after {timeout_ms}ms waiting for {server}")]
    QueryTimeout { server: String, timeout_ms: u64 },

    #[error("Domain {0} not found (NXDOMAIN)")]
    NxDomain(String),

    #[error("No A/AAAA records for {0}")]
    NoRecords(String),

    #[error("Server {server} answered {rcode}")]
    ServerFailure { server: String, rcode: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Lookup cancelled")]
    Cancelled,
}

/// Why a single domain lookup failed.
///
/// Carried inside a lookup result instead of being raised, so one failing
/// domain never aborts a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("no such host")]
    NxDomain,

    #[error("no A/AAAA records")]
    NoRecords,

    #[error("server failure ({rcode})")]
    ServerFailure { rcode: String },

    #[error("nameserver unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("invalid nameserver: {reason}")]
    InvalidNameserver { reason: String },

    #[error("invalid domain: {reason}")]
    InvalidDomain { reason: String },

    #[error("cancelled")]
    Cancelled,
}

impl ResolutionFailure {
    /// Short machine-friendly label, used in JSON output and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::NxDomain => "nxdomain",
            Self::NoRecords => "no_records",
            Self::ServerFailure { .. } => "server_failure",
            Self::Unreachable { .. } => "unreachable",
            Self::InvalidNameserver { .. } => "invalid_nameserver",
            Self::InvalidDomain { .. } => "invalid_domain",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<DomainError> for ResolutionFailure {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::QueryTimeout { timeout_ms, .. } => Self::Timeout { timeout_ms },
            DomainError::NxDomain(_) => Self::NxDomain,
            DomainError::NoRecords(_) => Self::NoRecords,
            DomainError::ServerFailure { rcode, .. } => Self::ServerFailure { rcode },
            DomainError::InvalidNameserver { reason, .. } => Self::InvalidNameserver { reason },
            DomainError::InvalidDomainName(reason) => Self::InvalidDomain { reason },
            DomainError::Cancelled => Self::Cancelled,
            DomainError::Transport { reason, .. } => Self::Unreachable { reason },
            other => Self::Unreachable {
                reason: other.to_string(),
            },
        }
    }
}
