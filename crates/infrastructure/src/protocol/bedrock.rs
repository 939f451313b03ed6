//! Bedrock Edition status via a RakNet unconnected ping.

use super::errors::{ProtocolError, ProtocolResult};
use super::net::{bind_udp, resolve_socket_addrs, with_deadline};
use async_trait::async_trait;
use bytes::{BufMut, BytesMut};
use mcgate_application::ports::StatusProber;
use mcgate_domain::{
    Address, BedrockPlayers, BedrockServerInfo, BedrockStatus, Motd, StatusOptions, StatusResult,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;
use tracing::debug;

const UNCONNECTED_PING: u8 = 0x01;
const UNCONNECTED_PONG: u8 = 0x1C;

pub const RAKNET_MAGIC: [u8; 16] = [
    0x00, 0xFF, 0xFF, 0x00, 0xFE, 0xFE, 0xFE, 0xFE, 0xFD, 0xFD, 0xFD, 0xFD, 0x12, 0x34, 0x56, 0x78,
];

/// id(1) + time(8) + server guid(8) + magic(16)
const PONG_HEADER_LEN: usize = 33;
const MAX_DATAGRAM: usize = 4096;

pub struct BedrockStatusClient {
    client_guid: i64,
}

impl BedrockStatusClient {
    pub fn new() -> Self {
        Self {
            client_guid: fastrand::i64(..),
        }
    }

    async fn ping(
        &self,
        address: &Address,
        deadline: Instant,
    ) -> ProtocolResult<BedrockServerInfo> {
        let addrs =
            resolve_socket_addrs(address.connect_host(), address.connect_port(), deadline).await?;
        let target = addrs.first().copied().ok_or(ProtocolError::NoResponse)?;
        let socket = bind_udp(target).await?;

        let packet = encode_ping(unix_millis(), self.client_guid);
        let started = Instant::now();
        with_deadline(deadline, socket.send_to(&packet, target)).await?;

        let mut buf = vec![0u8; MAX_DATAGRAM];
        loop {
            let (len, from) = with_deadline(deadline, socket.recv_from(&mut buf)).await?;
            if from != target {
                debug!(
                    expected = %target,
                    from = %from,
                    "Ignoring datagram from unexpected source"
                );
                continue;
            }
            if buf.first() != Some(&UNCONNECTED_PONG) {
                debug!(from = %from, "Ignoring non-pong datagram");
                continue;
            }

            let latency_ms = started.elapsed().as_millis() as u64;
            let advertisement = parse_pong(&buf[..len])?;
            return parse_advertisement(&advertisement, latency_ms);
        }
    }
}

impl Default for BedrockStatusClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusProber for BedrockStatusClient {
    async fn probe(
        &self,
        address: &Address,
        _options: &StatusOptions,
        timeout: Duration,
    ) -> StatusResult {
        let deadline = Instant::now() + timeout;

        let status = match self.ping(address, deadline).await {
            Ok(info) => BedrockStatus::online(address, info),
            Err(e) => {
                debug!(server = %address, error = %e, "Bedrock ping failed");
                BedrockStatus::offline(address)
            }
        };
        StatusResult::Bedrock(status)
    }
}

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

pub fn encode_ping(timestamp_ms: i64, client_guid: i64) -> BytesMut {
    let mut buf = BytesMut::with_capacity(33);
    buf.put_u8(UNCONNECTED_PING);
    buf.put_i64(timestamp_ms);
    buf.put_slice(&RAKNET_MAGIC);
    buf.put_i64(client_guid);
    buf
}

/// Extracts the advertisement string from an unconnected pong.
pub fn parse_pong(packet: &[u8]) -> ProtocolResult<String> {
    if packet.len() < PONG_HEADER_LEN + 2 || packet[0] != UNCONNECTED_PONG {
        return Err(ProtocolError::Malformed("short unconnected pong".to_string()));
    }
    if packet[17..PONG_HEADER_LEN] != RAKNET_MAGIC {
        return Err(ProtocolError::Malformed("pong without RakNet magic".to_string()));
    }

    let len = u16::from_be_bytes([packet[PONG_HEADER_LEN], packet[PONG_HEADER_LEN + 1]]) as usize;
    let start = PONG_HEADER_LEN + 2;
    let body = packet
        .get(start..start + len)
        .ok_or_else(|| ProtocolError::Malformed("pong string runs past datagram".to_string()))?;

    String::from_utf8(body.to_vec())
        .map_err(|e| ProtocolError::Malformed(format!("pong string is not UTF-8: {}", e)))
}

/// `edition;motd;protocol;version;online;max;serverId;levelName;gamemode;gamemodeId;portV4;portV6;`
pub fn parse_advertisement(text: &str, latency_ms: u64) -> ProtocolResult<BedrockServerInfo> {
    let fields: Vec<&str> = text.split(';').collect();
    if fields.len() < 6 {
        return Err(ProtocolError::Malformed(format!(
            "advertisement has {} fields",
            fields.len()
        )));
    }

    let number = |idx: usize, name: &str| -> ProtocolResult<i64> {
        fields[idx]
            .trim()
            .parse()
            .map_err(|_| {
                ProtocolError::Malformed(format!("{} '{}' is not a number", name, fields[idx]))
            })
    };
    let optional = |idx: usize| -> Option<String> {
        fields
            .get(idx)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
    };

    let protocol = number(2, "protocol")?;
    let protocol_version = i32::try_from(protocol)
        .map_err(|_| ProtocolError::Malformed(format!("protocol {} is out of range", protocol)))?;

    Ok(BedrockServerInfo {
        edition: fields[0].to_string(),
        motd: Motd::from_legacy(fields[1]),
        protocol_version,
        version: fields[3].to_string(),
        players: BedrockPlayers {
            online: number(4, "online players")?,
            max: number(5, "max players")?,
        },
        server_id: optional(6),
        level_name: optional(7),
        gamemode: optional(8),
        gamemode_id: optional(9).and_then(|v| v.parse().ok()),
        port_ipv4: optional(10).and_then(|v| v.parse().ok()),
        port_ipv6: optional(11).and_then(|v| v.parse().ok()),
        latency_ms,
    })
}
