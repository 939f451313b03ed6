use crate::edition::Edition;
use crate::errors::DomainError;
use serde::Serialize;
use std::fmt;
use std::net::Ipv6Addr;

/// Host/port override discovered through a `_minecraft._tcp` SRV record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SrvRecord {
    pub host: String,
    pub port: u16,
}

/// A fully resolved server address. The port is always concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub host: String,
    pub port: u16,
    pub edition: Edition,
    /// Whether the caller supplied the port. SRV discovery only runs when not.
    pub port_specified: bool,
    pub srv: Option<SrvRecord>,
}

impl Address {
    /// Parses `host` or `host:port`, filling in the edition's default port.
    pub fn parse(raw: &str, edition: Edition) -> Result<Self, DomainError> {
        let (host, port) = split_host_port(raw)?;

        Ok(Self {
            host,
            port: port.unwrap_or_else(|| edition.default_port()),
            edition,
            port_specified: port.is_some(),
            srv: None,
        })
    }

    pub fn with_srv(mut self, srv: SrvRecord) -> Self {
        self.srv = Some(srv);
        self
    }

    /// Host the protocol clients actually dial.
    pub fn connect_host(&self) -> &str {
        self.srv.as_ref().map_or(self.host.as_str(), |srv| srv.host.as_str())
    }

    pub fn connect_port(&self) -> u16 {
        self.srv.as_ref().map_or(self.port, |srv| srv.port)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Splits a raw address on the last colon outside an IPv6 bracket literal.
///
/// Accepted shapes: `host`, `host:port`, `[v6]`, `[v6]:port` and a bare
/// IPv6 literal without a port. Hosts are lower-cased.
pub fn split_host_port(raw: &str) -> Result<(String, Option<u16>), DomainError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(DomainError::InvalidAddress("address is empty".to_string()));
    }

    if let Some(rest) = raw.strip_prefix('[') {
        let end = rest.find(']').ok_or_else(|| {
            DomainError::InvalidAddress(format!("unbalanced IPv6 brackets in '{}'", raw))
        })?;
        let host = &rest[..end];
        host.parse::<Ipv6Addr>().map_err(|_| {
            DomainError::InvalidAddress(format!("'{}' is not a valid IPv6 address", host))
        })?;

        let tail = &rest[end + 1..];
        let port = if tail.is_empty() {
            None
        } else {
            let port = tail.strip_prefix(':').ok_or_else(|| {
                DomainError::InvalidAddress(format!("unexpected characters after ']' in '{}'", raw))
            })?;
            Some(parse_port(port)?)
        };

        return Ok((host.to_ascii_lowercase(), port));
    }

    if raw.contains('[') || raw.contains(']') {
        return Err(DomainError::InvalidAddress(format!(
            "unbalanced IPv6 brackets in '{}'",
            raw
        )));
    }

    let (host, port) = match raw.matches(':').count() {
        0 => (raw, None),
        1 => {
            let (host, port) = raw.rsplit_once(':').unwrap_or((raw, ""));
            (host, Some(parse_port(port)?))
        }
        _ => {
            raw.parse::<Ipv6Addr>().map_err(|_| {
                DomainError::InvalidAddress(format!(
                    "'{}' has multiple colons but is not an IPv6 literal",
                    raw
                ))
            })?;
            (raw, None)
        }
    };

    validate_host(host)?;
    Ok((host.to_ascii_lowercase(), port))
}

fn validate_host(host: &str) -> Result<(), DomainError> {
    if host.is_empty() {
        return Err(DomainError::InvalidAddress("host is empty".to_string()));
    }
    if host.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(DomainError::InvalidAddress(format!(
            "host '{}' contains invalid characters",
            host
        )));
    }
    Ok(())
}

fn parse_port(port: &str) -> Result<u16, DomainError> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidAddress(format!(
            "port '{}' is not numeric",
            port
        )));
    }

    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(DomainError::InvalidAddress(format!(
            "port '{}' is out of range (1-65535)",
            port
        ))),
        Ok(port) => Ok(port),
    }
}
