//! Turns a caller-supplied nameserver string into a socket address.
//!
//! Accepted forms: `8.8.8.8`, `2001:4860:4860::8888`, `[2001:db8::1]:5353`,
//! `127.0.0.1:5353`, `dns.example.net` and `dns.example.net:5353`.

use cloudmap_domain::validators::validate_domain_name;
use cloudmap_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use tokio::net::lookup_host;
use tracing::debug;

/// Parse an address literal without touching the network.
pub fn parse_literal(nameserver: &str, default_port: u16) -> Option<SocketAddr> {
    let nameserver = nameserver.trim();

    if let Ok(addr) = nameserver.parse::<SocketAddr>() {
        return Some(addr);
    }

    let bare = nameserver
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(nameserver);

    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, default_port))
}

/// Resolve a nameserver string to the address queries are sent to.
///
/// Host names go through the system resolver and the first address wins.
pub async fn resolve_nameserver(
    nameserver: &str,
    default_port: u16,
) -> Result<SocketAddr, DomainError> {
    if let Some(addr) = parse_literal(nameserver, default_port) {
        return Ok(addr);
    }

    let invalid = |reason: String| DomainError::InvalidNameserver {
        nameserver: nameserver.to_string(),
        reason,
    };

    let (host, port) = split_host_port(nameserver.trim(), default_port).map_err(invalid)?;
    validate_domain_name(host).map_err(invalid)?;

    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|e| invalid(format!("cannot resolve host: {}", e)))?;

    let addr = addrs
        .next()
        .ok_or_else(|| invalid("host has no addresses".to_string()))?;

    debug!(nameserver = %nameserver, resolved = %addr, "Nameserver host resolved");
    Ok(addr)
}

fn split_host_port(nameserver: &str, default_port: u16) -> Result<(&str, u16), String> {
    match nameserver.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => {
            let port = port
                .parse::<u16>()
                .map_err(|_| format!("invalid port '{}'", port))?;
            if port == 0 {
                return Err("port cannot be 0".to_string());
            }
            Ok((host, port))
        }
        Some(_) => Err("not a valid address".to_string()),
        None => Ok((nameserver, default_port)),
    }
}
