//! GameSpy4 UDP query: handshake for a challenge token, then full stat.

use crate::protocol::errors::{ProtocolError, ProtocolResult};
use crate::protocol::net::{bind_udp, resolve_socket_addrs, with_deadline};
use bytes::{BufMut, BytesMut};
use mcgate_domain::{Address, QueryData};
use std::collections::BTreeMap;
use tokio::net::UdpSocket;
use tokio::time::Instant;

const MAGIC: [u8; 2] = [0xFE, 0xFD];
const TYPE_HANDSHAKE: u8 = 0x09;
const TYPE_STAT: u8 = 0x00;

/// `splitnum\0\x80\0` after the 5-byte header.
const STAT_PADDING: usize = 16;
/// `\x01player_\0\0` between the key/values and the player list.
const PLAYER_SECTION_PADDING: usize = 10;

const MAX_DATAGRAM: usize = 65_535;

pub(super) async fn query_full_stat(
    address: &Address,
    deadline: Instant,
) -> ProtocolResult<QueryData> {
    let addrs = resolve_socket_addrs(address.connect_host(), address.connect_port(), deadline)
        .await?;
    let target = addrs
        .first()
        .copied()
        .ok_or(ProtocolError::NoResponse)?;

    let socket = bind_udp(target).await?;
    with_deadline(deadline, socket.connect(target)).await?;

    // Session ids must keep the high nibble of each byte clear.
    let session = fastrand::i32(..) & 0x0F0F_0F0F;

    let challenge = exchange(&socket, &handshake_request(session), deadline).await?;
    let token = parse_challenge(&challenge, session)?;

    let stat = exchange(&socket, &full_stat_request(session, token), deadline).await?;
    parse_full_stat(&stat, session)
}

async fn exchange(
    socket: &UdpSocket,
    request: &[u8],
    deadline: Instant,
) -> ProtocolResult<Vec<u8>> {
    with_deadline(deadline, socket.send(request)).await?;
    let mut buf = vec![0u8; MAX_DATAGRAM];
    let len = with_deadline(deadline, socket.recv(&mut buf)).await?;
    buf.truncate(len);
    Ok(buf)
}

fn handshake_request(session: i32) -> BytesMut {
    let mut buf = BytesMut::with_capacity(7);
    buf.put_slice(&MAGIC);
    buf.put_u8(TYPE_HANDSHAKE);
    buf.put_i32(session);
    buf
}

fn full_stat_request(session: i32, token: i32) -> BytesMut {
    let mut buf = BytesMut::with_capacity(15);
    buf.put_slice(&MAGIC);
    buf.put_u8(TYPE_STAT);
    buf.put_i32(session);
    buf.put_i32(token);
    buf.put_slice(&[0, 0, 0, 0]);
    buf
}

fn check_header(packet: &[u8], kind: u8, session: i32) -> ProtocolResult<&[u8]> {
    if packet.len() < 5 || packet[0] != kind {
        return Err(ProtocolError::Malformed("bad query response header".to_string()));
    }
    let echoed = i32::from_be_bytes([packet[1], packet[2], packet[3], packet[4]]);
    if echoed != session {
        return Err(ProtocolError::Malformed("query session id mismatch".to_string()));
    }
    Ok(&packet[5..])
}

/// The token arrives as a NUL-terminated decimal string.
pub fn parse_challenge(packet: &[u8], session: i32) -> ProtocolResult<i32> {
    let body = check_header(packet, TYPE_HANDSHAKE, session)?;
    let text = String::from_utf8_lossy(body);
    let token: i64 = text
        .trim_end_matches('\0')
        .trim()
        .parse()
        .map_err(|_| ProtocolError::Malformed(format!("bad challenge token '{}'", text)))?;

    // Tokens above i32::MAX are sent as-is and must wrap.
    Ok(token as i32)
}

pub fn parse_full_stat(packet: &[u8], session: i32) -> ProtocolResult<QueryData> {
    check_header(packet, TYPE_STAT, session)?;
    let mut rest = packet
        .get(STAT_PADDING..)
        .ok_or_else(|| ProtocolError::Malformed("full stat too short".to_string()))?;

    let mut raw = BTreeMap::new();
    loop {
        let key = next_cstring(&mut rest)?;
        if key.is_empty() {
            break;
        }
        let value = next_cstring(&mut rest)?;
        raw.insert(key, value);
    }

    let mut players = Vec::new();
    if rest.len() >= PLAYER_SECTION_PADDING {
        rest = &rest[PLAYER_SECTION_PADDING..];
        while !rest.is_empty() {
            let name = next_cstring(&mut rest)?;
            if name.is_empty() {
                break;
            }
            players.push(name);
        }
    }

    let (software, plugins) = raw
        .get("plugins")
        .map(|value| parse_plugins(value))
        .unwrap_or((None, Vec::new()));

    Ok(QueryData {
        software,
        plugins,
        world: raw.get("map").cloned().filter(|world| !world.is_empty()),
        players,
        raw,
    })
}

fn next_cstring(buf: &mut &[u8]) -> ProtocolResult<String> {
    let end = buf
        .iter()
        .position(|b| *b == 0)
        .ok_or_else(|| ProtocolError::Malformed("unterminated string in full stat".to_string()))?;
    let value = String::from_utf8_lossy(&buf[..end]).into_owned();
    *buf = &buf[end + 1..];
    Ok(value)
}

/// `"Paper on Bukkit 1.20.4: WorldEdit 7.2; Essentials 2.20"`
pub fn parse_plugins(value: &str) -> (Option<String>, Vec<String>) {
    let value = value.trim();
    if value.is_empty() {
        return (None, Vec::new());
    }

    match value.split_once(':') {
        Some((software, list)) => {
            let plugins = list
                .split(';')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            let software = software.trim();
            let software = (!software.is_empty()).then(|| software.to_string());
            (software, plugins)
        }
        None => (Some(value.to_string()), Vec::new()),
    }
}
