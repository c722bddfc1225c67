use super::{timeout_error, transport_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use cloudmap_domain::DomainError;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP (RFC 1035 §4.2.2): every message carries a 2-byte length prefix.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let len = u16::try_from(message_bytes.len()).map_err(|_| {
            transport_error(self.server_addr, "query exceeds 65535 bytes".to_string())
        })?;

        let mut stream = TcpStream::connect(self.server_addr).await.map_err(|e| {
            transport_error(self.server_addr, format!("TCP connect failed: {}", e))
        })?;

        let mut frame = Vec::with_capacity(message_bytes.len() + 2);
        frame.extend_from_slice(&len.to_be_bytes());
        frame.extend_from_slice(message_bytes);

        stream.write_all(&frame).await.map_err(|e| {
            transport_error(self.server_addr, format!("TCP write failed: {}", e))
        })?;

        let mut len_buf = [0u8; 2];
        stream.read_exact(&mut len_buf).await.map_err(|e| {
            transport_error(self.server_addr, format!("TCP read failed: {}", e))
        })?;

        let response_len = u16::from_be_bytes(len_buf) as usize;
        let mut response = vec![0u8; response_len];
        stream.read_exact(&mut response).await.map_err(|e| {
            transport_error(self.server_addr, format!("TCP read failed: {}", e))
        })?;

        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let start = Instant::now();

        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| timeout_error(self.server_addr, timeout))??;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }
}
