#![allow(dead_code)]
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

const TYPE_A: u16 = 1;
const TYPE_CNAME: u16 = 5;
const TYPE_AAAA: u16 = 28;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_REFUSED: u8 = 5;

/// What the mock nameserver answers for every query.
#[derive(Debug, Clone, Default)]
pub struct MockAnswers {
    pub v4: Vec<Ipv4Addr>,
    pub v6: Vec<Ipv6Addr>,
    pub rcode: u8,
    /// Reply over UDP with TC=1 and no answers; the full answer is served over TCP.
    pub truncate_udp: bool,
    /// Never reply.
    pub silent: bool,
    /// Reply with a transaction ID that does not match the query.
    pub wrong_id: bool,
    /// Answer through a CNAME to this target.
    pub cname: Option<String>,
    /// Send a bogus datagram from another local port before the real reply.
    pub stray_first: bool,
}

impl MockAnswers {
    pub fn a(addrs: &[&str]) -> Self {
        Self {
            v4: addrs.iter().map(|a| a.parse().unwrap()).collect(),
            ..Self::default()
        }
    }

    pub fn with_aaaa(mut self, addrs: &[&str]) -> Self {
        self.v6 = addrs.iter().map(|a| a.parse().unwrap()).collect();
        self
    }

    pub fn rcode(rcode: u8) -> Self {
        Self {
            rcode,
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    pub fn truncated(mut self) -> Self {
        self.truncate_udp = true;
        self
    }

    pub fn wrong_id(mut self) -> Self {
        self.wrong_id = true;
        self
    }

    pub fn with_cname(mut self, target: &str) -> Self {
        self.cname = Some(target.to_string());
        self
    }

    pub fn stray_first(mut self) -> Self {
        self.stray_first = true;
        self
    }
}

/// Loopback nameserver answering from a fixed [`MockAnswers`].
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answers: MockAnswers) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let tcp = if answers.truncate_udp {
            Some(TcpListener::bind(addr).await?)
        } else {
            None
        };

        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        if answers.silent {
                            continue;
                        }
                        let response = build_response(&buf[..len], &answers, answers.truncate_udp);
                        if answers.stray_first {
                            send_stray(&response, peer).await;
                        }
                        let _ = socket.send_to(&response, peer).await;
                    }
                    accepted = accept(&tcp) => {
                        if let Ok((mut stream, _)) = accepted {
                            let answers = answers.clone();
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                let response = build_response(&query, &answers, false);
                                let mut frame = (response.len() as u16).to_be_bytes().to_vec();
                                frame.extend_from_slice(&response);
                                let _ = stream.write_all(&frame).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Nameserver string in `ip:port` form.
    pub fn nameserver(&self) -> String {
        self.addr.to_string()
    }

    /// UDP queries received so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Same payload with a shifted ID, sent from a port the client never queried.
async fn send_stray(response: &[u8], peer: SocketAddr) {
    let Ok(other) = UdpSocket::bind("127.0.0.1:0").await else {
        return;
    };
    let mut bogus = response.to_vec();
    if bogus.len() >= 2 {
        bogus[1] = bogus[1].wrapping_add(7);
    }
    let _ = other.send_to(&bogus, peer).await;
}

async fn accept(
    listener: &Option<TcpListener>,
) -> std::io::Result<(tokio::net::TcpStream, SocketAddr)> {
    match listener {
        Some(listener) => listener.accept().await,
        None => std::future::pending().await,
    }
}

/// Offset just past the question's QTYPE/QCLASS, and the QTYPE.
fn question_end(query: &[u8]) -> Option<(usize, u16)> {
    let mut i = 12;
    while *query.get(i)? != 0 {
        i += query[i] as usize + 1;
    }
    i += 1;
    let qtype = u16::from_be_bytes([*query.get(i)?, *query.get(i + 1)?]);
    Some((i + 4, qtype))
}

/// Wire-format reply to `query` as the mock nameserver would send it.
pub fn build_response(query: &[u8], answers: &MockAnswers, truncate: bool) -> Vec<u8> {
    let Some((qend, qtype)) = question_end(query) else {
        return vec![];
    };

    let answering = !truncate && answers.rcode == RCODE_NOERROR;
    let records: Vec<Vec<u8>> = if !answering {
        Vec::new()
    } else if qtype == TYPE_A {
        answers.v4.iter().map(|ip| ip.octets().to_vec()).collect()
    } else if qtype == TYPE_AAAA {
        answers.v6.iter().map(|ip| ip.octets().to_vec()).collect()
    } else {
        Vec::new()
    };

    let mut response = Vec::with_capacity(512);

    let mut id = [query[0], query[1]];
    if answers.wrong_id {
        id[1] = id[1].wrapping_add(1);
    }
    response.extend_from_slice(&id);

    // QR=1, RD=1, TC as requested; RA=1 with the configured RCODE
    response.push(0x81 | if truncate { 0x02 } else { 0x00 });
    response.push(0x80 | (answers.rcode & 0x0f));

    let cname = answers.cname.as_deref().filter(|_| answering);
    let ancount = records.len() + usize::from(cname.is_some());

    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(ancount as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    response.extend_from_slice(&query[12..qend]);

    if let Some(target) = cname {
        let rdata = encode_name(target);
        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&TYPE_CNAME.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    for rdata in records {
        response.extend_from_slice(&[0xc0, 0x0c]); // pointer to question name
        response.extend_from_slice(&qtype.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]); // class IN
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]); // TTL 60
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    response
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
