//! Pre-1.7 ping (`0xFE 0x01`), answered with a UTF-16BE kick string.

use super::slp::LEGACY_KICK;
use crate::protocol::errors::{ProtocolError, ProtocolResult};
use crate::protocol::net::{connect_tcp, with_deadline};
use mcgate_domain::motd::strip_formatting;
use mcgate_domain::{Address, JavaPlayers, JavaServerInfo, JavaVersion, Motd};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::Instant;

const LEGACY_PING: [u8; 2] = [0xFE, 0x01];

/// 1.4 - 1.6 replies start with this marker and separate fields with NUL.
const V1_4_PREFIX: &str = "\u{00A7}1\0";

pub(super) async fn ping_legacy(
    address: &Address,
    deadline: Instant,
) -> ProtocolResult<JavaServerInfo> {
    let mut stream = connect_tcp(address.connect_host(), address.connect_port(), deadline).await?;

    let started = Instant::now();
    with_deadline(deadline, stream.write_all(&LEGACY_PING)).await?;

    let marker = with_deadline(deadline, stream.read_u8()).await?;
    if marker != LEGACY_KICK {
        return Err(ProtocolError::Malformed(format!(
            "legacy reply starts with {:#04x}",
            marker
        )));
    }

    let units = with_deadline(deadline, stream.read_u16()).await? as usize;
    let mut raw = vec![0u8; units * 2];
    with_deadline(deadline, stream.read_exact(&mut raw)).await?;
    let latency = started.elapsed();

    let utf16: Vec<u16> = raw
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16(&utf16)
        .map_err(|e| ProtocolError::Malformed(format!("legacy reply is not UTF-16: {}", e)))?;

    parse_legacy_payload(&text, latency.as_millis() as u64)
}

pub fn parse_legacy_payload(text: &str, latency_ms: u64) -> ProtocolResult<JavaServerInfo> {
    let (version, motd, online, max) = match text.strip_prefix(V1_4_PREFIX) {
        Some(rest) => {
            let fields: Vec<&str> = rest.split('\0').collect();
            if fields.len() < 5 {
                return Err(ProtocolError::Malformed(format!(
                    "legacy reply has {} fields",
                    fields.len()
                )));
            }
            let protocol = parse_number::<i32>(fields[0], "protocol")?;
            let version = JavaVersion {
                name: fields[1].to_string(),
                name_clean: strip_formatting(fields[1]),
                protocol,
            };
            (Some(version), fields[2], fields[3], fields[4])
        }
        None => {
            // motd§online§max; the MOTD itself may contain §.
            let mut parts = text.rsplitn(3, '\u{00A7}');
            let max = parts.next();
            let online = parts.next();
            let motd = parts.next();
            match (motd, online, max) {
                (Some(motd), Some(online), Some(max)) => (None, motd, online, max),
                _ => {
                    return Err(ProtocolError::Malformed(
                        "legacy reply is missing fields".to_string(),
                    ))
                }
            }
        }
    };

    Ok(JavaServerInfo {
        version,
        players: JavaPlayers {
            online: parse_number(online, "online players")?,
            max: parse_number(max, "max players")?,
            sample: Vec::new(),
        },
        motd: Motd::from_legacy(motd),
        icon: None,
        latency_ms,
        mods: Vec::new(),
        legacy: true,
        query: None,
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &str) -> ProtocolResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ProtocolError::Malformed(format!("{} '{}' is not a number", field, value)))
}
