use super::forwarding::{MessageBuilder, ResponseParser};
use super::nameserver::resolve_nameserver;
use super::transport::Transport;
use async_trait::async_trait;
use bytes::Bytes;
use cloudmap_application::ports::NameResolver;
use cloudmap_domain::config::DnsConfig;
use cloudmap_domain::{DomainError, NameLookupRequest, NameLookupResult, ResolutionFailure};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Asks one specific nameserver for a domain's A and AAAA records.
///
/// Queries go out over UDP; a truncated answer is retried over TCP with
/// whatever is left of the time budget. The timeout bounds the whole lookup,
/// including resolving a nameserver given by host name.
pub struct NameserverResolver {
    timeout: Duration,
    default_port: u16,
    tcp_fallback: bool,
}

impl NameserverResolver {
    pub fn new(query_timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(query_timeout_ms),
            default_port: 53,
            tcp_fallback: true,
        }
    }

    pub fn from_config(config: &DnsConfig) -> Self {
        info!(
            timeout_ms = config.query_timeout,
            port = config.port,
            tcp_fallback = config.tcp_fallback,
            "DNS resolver created"
        );

        Self::new(config.query_timeout)
            .with_default_port(config.port)
            .with_tcp_fallback(config.tcp_fallback)
    }

    /// Port used for nameservers given without one.
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    async fn lookup(&self, request: &NameLookupRequest) -> Result<Vec<IpAddr>, DomainError> {
        let server = resolve_nameserver(&request.nameserver, self.default_port).await?;

        let (v4, v6) = tokio::join!(
            self.query(&request.domain, RecordType::A, server),
            self.query(&request.domain, RecordType::AAAA, server),
        );

        merge_families(&request.domain, v4, v6)
    }

    async fn query(
        &self,
        domain: &str,
        record_type: RecordType,
        server: SocketAddr,
    ) -> Result<Vec<IpAddr>, DomainError> {
        let start = Instant::now();
        let (id, query_bytes) = MessageBuilder::build_query_with_id(domain, record_type)?;

        let udp = Transport::udp(server);
        let response = udp.send(&query_bytes, self.timeout).await?;
        let mut protocol = response.protocol_used;
        let mut dns_response = ResponseParser::parse_bytes(Bytes::from(response.bytes))?;

        if dns_response.truncated && self.tcp_fallback {
            debug!(
                server = %server,
                "Response truncated (TC bit), retrying via TCP"
            );

            let remaining = self
                .timeout
                .checked_sub(start.elapsed())
                .unwrap_or(Duration::from_millis(500));

            let tcp = Transport::tcp(server);
            let tcp_response = tcp.send(&query_bytes, remaining).await?;
            protocol = tcp_response.protocol_used;
            dns_response = ResponseParser::parse_bytes(Bytes::from(tcp_response.bytes))?;
        }

        debug!(
            domain = %domain,
            record_type = ?record_type,
            server = %server,
            protocol,
            cname_hops = dns_response.cname_hops,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Answer received"
        );

        if dns_response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response id {} does not match query id {} from {}",
                dns_response.id, id, server
            )));
        }

        match dns_response.rcode {
            ResponseCode::NoError => {
                let wanted_v4 = record_type == RecordType::A;
                Ok(dns_response
                    .addresses
                    .into_iter()
                    .filter(|ip| ip.is_ipv4() == wanted_v4)
                    .collect())
            }
            ResponseCode::NXDomain => Err(DomainError::NxDomain(domain.to_string())),
            rcode => Err(DomainError::ServerFailure {
                server: server.to_string(),
                rcode: ResponseParser::rcode_to_status(rcode).to_string(),
            }),
        }
    }
}

/// Combine the A and AAAA outcomes: A answers first, then AAAA.
///
/// One family answering with addresses is enough. When neither does, the A
/// error wins over the AAAA one.
fn merge_families(
    domain: &str,
    v4: Result<Vec<IpAddr>, DomainError>,
    v6: Result<Vec<IpAddr>, DomainError>,
) -> Result<Vec<IpAddr>, DomainError> {
    match (v4, v6) {
        (Ok(mut addresses), Ok(v6_addresses)) => {
            addresses.extend(v6_addresses);
            if addresses.is_empty() {
                Err(DomainError::NoRecords(domain.to_string()))
            } else {
                Ok(addresses)
            }
        }
        (Ok(addresses), Err(e)) | (Err(e), Ok(addresses)) => {
            if addresses.is_empty() {
                Err(e)
            } else {
                debug!(domain = %domain, error = %e, "One address family failed");
                Ok(addresses)
            }
        }
        (Err(e), Err(_)) => Err(e),
    }
}

#[async_trait]
impl NameResolver for NameserverResolver {
    async fn resolve(&self, request: &NameLookupRequest) -> NameLookupResult {
        let start = Instant::now();

        let outcome = tokio::time::timeout(self.timeout, self.lookup(request))
            .await
            .unwrap_or_else(|_| {
                Err(DomainError::QueryTimeout {
                    server: request.nameserver.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            });

        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(addresses) => NameLookupResult::resolved(request, addresses, elapsed_ms),
            Err(e) => {
                debug!(
                    domain = %request.domain,
                    nameserver = %request.nameserver,
                    error = %e,
                    "Lookup failed"
                );
                NameLookupResult::failed(request, ResolutionFailure::from(e), elapsed_ms)
            }
        }
    }
}
