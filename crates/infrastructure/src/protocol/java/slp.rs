//! Modern (1.7+) Server List Ping over TCP.

use super::response::RawStatus;
use crate::protocol::codec::{
    decode_string, decode_varint, encode_packet, read_varint, read_varint_after, write_string,
    write_varint,
};
use crate::protocol::errors::{ProtocolError, ProtocolResult};
use crate::protocol::net::{connect_tcp, with_deadline, within};
use bytes::{BufMut, BytesMut};
use mcgate_domain::{Address, JavaServerInfo};
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::debug;

const HANDSHAKE_PACKET: i32 = 0x00;
const STATUS_PACKET: i32 = 0x00;
const PING_PACKET: i32 = 0x01;

/// Servers answer any protocol version in the status state; -1 is the
/// conventional "unknown".
const PROTOCOL_VERSION: i32 = -1;
const NEXT_STATE_STATUS: i32 = 1;

/// Kick packet id of pre-1.7 servers.
pub(super) const LEGACY_KICK: u8 = 0xFF;

const MAX_PACKET_SIZE: usize = 2 * 1024 * 1024;

pub(super) async fn ping_modern(
    address: &Address,
    deadline: Instant,
) -> ProtocolResult<JavaServerInfo> {
    let host = address.connect_host();
    let port = address.connect_port();
    let mut stream = connect_tcp(host, port, deadline).await?;

    let request = status_request(host, port);
    let started = Instant::now();
    with_deadline(deadline, stream.write_all(&request)).await?;

    let first = match with_deadline(deadline, stream.read_u8()).await {
        Ok(byte) => byte,
        Err(ProtocolError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::NoResponse)
        }
        Err(e) => return Err(e),
    };
    let length = if first == LEGACY_KICK {
        // 0xFF also opens any VarInt length of the form 128k + 127. A kick
        // continues with the high byte of its UTF-16 length, which a
        // canonical VarInt never encodes as zero.
        let second = with_deadline(deadline, stream.read_u8()).await?;
        if second == 0x00 {
            return Err(ProtocolError::LegacyServer);
        }
        let rest = within(deadline, read_varint_after(&mut stream, second)).await?;
        (i64::from(rest) << 7) | 0x7F
    } else {
        i64::from(within(deadline, read_varint_after(&mut stream, first)).await?)
    };
    let length = usize::try_from(length)
        .ok()
        .filter(|len| *len > 0 && *len <= MAX_PACKET_SIZE)
        .ok_or_else(|| ProtocolError::Malformed(format!("bad packet length {}", length)))?;

    let mut packet = vec![0u8; length];
    with_deadline(deadline, stream.read_exact(&mut packet)).await?;
    let status_rtt = started.elapsed();

    if first == LEGACY_KICK && is_legacy_kick_text(&packet) {
        return Err(ProtocolError::LegacyServer);
    }

    let json = parse_status_packet(&packet)?;
    let raw: RawStatus = serde_json::from_str(&json)?;

    let latency = match ping(&mut stream, deadline).await {
        Ok(rtt) => rtt,
        Err(e) => {
            debug!(host = %host, port, error = %e, "Ping failed, using status round trip");
            status_rtt
        }
    };

    Ok(raw.into_info(latency.as_millis() as u64))
}

/// Handshake followed by the empty status request, in one write.
fn status_request(host: &str, port: u16) -> BytesMut {
    let mut handshake = BytesMut::with_capacity(host.len() + 16);
    write_varint(&mut handshake, PROTOCOL_VERSION);
    write_string(&mut handshake, host);
    handshake.put_u16(port);
    write_varint(&mut handshake, NEXT_STATE_STATUS);

    let mut request = BytesMut::new();
    request.put_slice(&encode_packet(HANDSHAKE_PACKET, &handshake));
    request.put_slice(&encode_packet(STATUS_PACKET, &[]));
    request
}

/// `packet` starts after the kick's high length byte: the low length byte,
/// then the text, which for 1.4+ servers opens with a UTF-16BE section sign.
/// A status packet instead holds a VarInt there with the high bit set.
fn is_legacy_kick_text(packet: &[u8]) -> bool {
    packet.get(1..3) == Some(&[0x00, 0xA7][..])
}

fn parse_status_packet(packet: &[u8]) -> ProtocolResult<String> {
    let (id, used) = decode_varint(packet)?;
    if id != STATUS_PACKET {
        return Err(ProtocolError::Malformed(format!(
            "expected status packet, got id {:#04x}",
            id
        )));
    }
    let (json, _) = decode_string(&packet[used..])?;
    Ok(json)
}

async fn ping(stream: &mut TcpStream, deadline: Instant) -> ProtocolResult<Duration> {
    let payload = fastrand::i64(..).to_be_bytes();
    let packet = encode_packet(PING_PACKET, &payload);

    let started = Instant::now();
    with_deadline(deadline, stream.write_all(&packet)).await?;

    let length = within(deadline, read_varint(stream)).await?;
    if length != 9 {
        return Err(ProtocolError::Malformed(format!(
            "pong length {} (expected 9)",
            length
        )));
    }

    let mut pong = [0u8; 9];
    with_deadline(deadline, stream.read_exact(&mut pong)).await?;
    if pong[0] != PING_PACKET as u8 || pong[1..] != payload {
        return Err(ProtocolError::Malformed("pong does not echo ping".to_string()));
    }

    Ok(started.elapsed())
}
