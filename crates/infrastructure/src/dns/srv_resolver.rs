use super::message_builder::MessageBuilder;
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use mcgate_application::ports::SrvResolver;
use mcgate_domain::{DomainError, SrvConfig, SrvRecord};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

const FALLBACK_NAMESERVER: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53);
const RESOLV_CONF: &str = "/etc/resolv.conf";
const MAX_DNS_PACKET: usize = 4096;

/// Single-shot UDP resolver for `_minecraft._tcp` SRV records.
pub struct UdpSrvResolver {
    nameserver: SocketAddr,
    timeout: Duration,
}

impl UdpSrvResolver {
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        Self {
            nameserver,
            timeout,
        }
    }

    pub fn from_config(config: &SrvConfig) -> Self {
        let nameserver = config
            .nameserver
            .as_deref()
            .and_then(|ns| match ns.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    warn!(nameserver = %ns, error = %e, "Ignoring unparseable SRV nameserver");
                    None
                }
            })
            .or_else(system_nameserver)
            .unwrap_or(FALLBACK_NAMESERVER);

        debug!(nameserver = %nameserver, timeout_ms = config.timeout_ms, "SRV resolver configured");
        Self::new(nameserver, config.timeout())
    }

    pub fn nameserver(&self) -> SocketAddr {
        self.nameserver
    }

    async fn exchange(&self, id: u16, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let deadline = Instant::now() + self.timeout;
        let bind_addr: SocketAddr = if self.nameserver.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::DnsLookupFailure(format!("UDP bind failed: {}", e)))?;
        socket
            .send_to(query, self.nameserver)
            .await
            .map_err(|e| DomainError::DnsLookupFailure(format!("UDP send failed: {}", e)))?;

        let mut buf = vec![0u8; MAX_DNS_PACKET];
        loop {
            let received = tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await;
            let (len, from) = match received {
                Ok(Ok(received)) => received,
                Ok(Err(e)) => {
                    return Err(DomainError::DnsLookupFailure(format!("UDP receive failed: {}", e)))
                }
                Err(_) => {
                    return Err(DomainError::DnsLookupFailure(format!(
                        "Timeout after {}ms waiting for {}",
                        self.timeout.as_millis(),
                        self.nameserver
                    )))
                }
            };

            if from != self.nameserver || len < 2 || u16::from_be_bytes([buf[0], buf[1]]) != id {
                debug!(from = %from, "Ignoring stray DNS datagram");
                continue;
            }

            buf.truncate(len);
            return Ok(buf);
        }
    }
}

#[async_trait]
impl SrvResolver for UdpSrvResolver {
    async fn lookup_srv(&self, host: &str) -> Result<Option<SrvRecord>, DomainError> {
        if host.parse::<IpAddr>().is_ok() {
            return Ok(None);
        }

        let (id, query) = MessageBuilder::build_srv_query(host)?;
        let response = self.exchange(id, &query).await?;
        let record = parse_srv_response(&response, id)?;

        debug!(host = %host, srv = ?record, "SRV lookup finished");
        Ok(record)
    }
}

/// Picks the best SRV answer: lowest priority, then highest weight.
///
/// NXDOMAIN and empty answers yield `None`, as does the `.` target that
/// signals the service is explicitly unavailable.
pub fn parse_srv_response(
    bytes: &[u8],
    expected_id: u16,
) -> Result<Option<SrvRecord>, DomainError> {
    let id = match bytes {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        _ => {
            return Err(DomainError::DnsLookupFailure(
                "DNS response shorter than its header".to_string(),
            ))
        }
    };
    if id != expected_id {
        return Err(DomainError::DnsLookupFailure(format!(
            "Response ID {} does not match query ID {}",
            id, expected_id
        )));
    }

    let message = Message::from_vec(bytes).map_err(|e| {
        DomainError::DnsLookupFailure(format!("Failed to parse DNS response: {}", e))
    })?;

    match message.response_code() {
        ResponseCode::NoError => {}
        ResponseCode::NXDomain => return Ok(None),
        rcode => {
            return Err(DomainError::DnsLookupFailure(format!(
                "Nameserver answered {}",
                rcode
            )))
        }
    }

    let best = message
        .answers()
        .iter()
        .filter_map(|record| match record.data() {
            RData::SRV(srv) => Some(srv),
            _ => None,
        })
        .min_by_key(|srv| (srv.priority(), std::cmp::Reverse(srv.weight())));

    let Some(srv) = best else {
        return Ok(None);
    };

    let target = srv.target().to_utf8();
    let host = target.trim_end_matches('.');
    if host.is_empty() {
        return Ok(None);
    }

    Ok(Some(SrvRecord {
        host: host.to_ascii_lowercase(),
        port: srv.port(),
    }))
}

/// First `nameserver` line of a resolv.conf, on port 53.
pub fn parse_resolv_conf(contents: &str) -> Option<SocketAddr> {
    contents.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("nameserver") {
            return None;
        }
        let addr = fields.next()?;
        let addr = addr.split('%').next().unwrap_or(addr);
        addr.parse::<IpAddr>().ok().map(|ip| SocketAddr::new(ip, 53))
    })
}

fn system_nameserver() -> Option<SocketAddr> {
    std::fs::read_to_string(RESOLV_CONF)
        .ok()
        .and_then(|contents| parse_resolv_conf(&contents))
}
