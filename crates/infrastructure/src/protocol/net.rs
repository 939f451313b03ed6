use super::errors::{ProtocolError, ProtocolResult};
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::Instant;
use tracing::debug;

/// Runs one I/O step against the shared probe deadline.
pub async fn with_deadline<T, F>(deadline: Instant, io: F) -> ProtocolResult<T>
where
    F: Future<Output = std::io::Result<T>>,
{
    match tokio::time::timeout_at(deadline, io).await {
        Ok(result) => result.map_err(ProtocolError::from),
        Err(_) => Err(ProtocolError::Timeout),
    }
}

pub async fn resolve_socket_addrs(
    host: &str,
    port: u16,
    deadline: Instant,
) -> ProtocolResult<Vec<SocketAddr>> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let addrs: Vec<SocketAddr> =
        with_deadline(deadline, tokio::net::lookup_host((host, port)))
            .await?
            .collect();

    if addrs.is_empty() {
        return Err(ProtocolError::Malformed(format!(
            "{} resolved to no addresses",
            host
        )));
    }
    Ok(addrs)
}

/// Connects to the first reachable address of `host`.
pub async fn connect_tcp(host: &str, port: u16, deadline: Instant) -> ProtocolResult<TcpStream> {
    let addrs = resolve_socket_addrs(host, port, deadline).await?;
    let mut last_error = None;

    for addr in addrs {
        match with_deadline(deadline, TcpStream::connect(addr)).await {
            Ok(stream) => {
                if let Err(e) = stream.set_nodelay(true) {
                    debug!(server = %addr, error = %e, "Failed to set TCP_NODELAY");
                }
                return Ok(stream);
            }
            Err(ProtocolError::Timeout) => return Err(ProtocolError::Timeout),
            Err(e) => {
                debug!(server = %addr, error = %e, "TCP connect failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(ProtocolError::NoResponse))
}

/// Binds an ephemeral UDP socket of the same family as `target`.
pub async fn bind_udp(target: SocketAddr) -> ProtocolResult<UdpSocket> {
    let bind_addr: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    Ok(UdpSocket::bind(bind_addr).await?)
}

/// Like [`with_deadline`] for steps that already yield protocol errors.
pub async fn within<T, F>(deadline: Instant, step: F) -> ProtocolResult<T>
where
    F: Future<Output = ProtocolResult<T>>,
{
    match tokio::time::timeout_at(deadline, step).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Timeout),
    }
}
