//! NuVotifier v2: HMAC-SHA256 signed JSON with a JSON acknowledgement.

use super::{read_greeting, read_line};
use crate::protocol::errors::{ProtocolError, ProtocolResult};
use crate::protocol::net::{connect_tcp, with_deadline};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::{BufMut, BytesMut};
use mcgate_domain::VoteRequest;
use ring::hmac;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::time::Instant;

pub const V2_MAGIC: u16 = 0x733A;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VotePayload<'a> {
    service_name: &'a str,
    username: &'a str,
    address: &'a str,
    timestamp: i64,
    challenge: &'a str,
}

#[derive(Serialize)]
struct Envelope {
    payload: String,
    signature: String,
}

#[derive(Deserialize)]
struct Ack {
    status: String,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub(super) async fn send(
    request: &VoteRequest,
    token: &str,
    deadline: Instant,
) -> ProtocolResult<()> {
    let stream = connect_tcp(&request.host, request.port, deadline).await?;
    let mut stream = BufReader::new(stream);

    let greeting = read_greeting(&mut stream, deadline).await?;
    let challenge = parse_challenge(&greeting)?;
    let frame = build_envelope(request, token, &challenge)?;

    with_deadline(deadline, stream.write_all(&frame)).await?;
    with_deadline(deadline, stream.flush()).await?;

    let ack = match read_line(&mut stream, deadline).await {
        Ok(line) => line,
        Err(ProtocolError::NoResponse) => String::new(),
        Err(e) => return Err(e),
    };
    check_ack(&ack)
}

/// `VOTIFIER 2 <challenge>`
pub fn parse_challenge(greeting: &str) -> ProtocolResult<String> {
    let mut parts = greeting.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("VOTIFIER"), Some(version), Some(challenge)) if version.starts_with('2') => {
            Ok(challenge.to_string())
        }
        _ => Err(ProtocolError::Malformed(format!(
            "greeting '{}' is not a v2 greeting",
            greeting
        ))),
    }
}

pub fn sign_payload(token: &str, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, token.as_bytes());
    STANDARD.encode(hmac::sign(&key, payload.as_bytes()).as_ref())
}

/// Magic, u16 length and the signed JSON envelope.
pub fn build_envelope(
    request: &VoteRequest,
    token: &str,
    challenge: &str,
) -> ProtocolResult<BytesMut> {
    let payload = serde_json::to_string(&VotePayload {
        service_name: &request.service_name,
        username: &request.username,
        address: &request.ip_address,
        timestamp: request.timestamp.timestamp_millis(),
        challenge,
    })?;

    let envelope = serde_json::to_vec(&Envelope {
        signature: sign_payload(token, &payload),
        payload,
    })?;

    let len = u16::try_from(envelope.len()).map_err(|_| {
        ProtocolError::Malformed(format!("vote envelope too large ({} bytes)", envelope.len()))
    })?;

    let mut frame = BytesMut::with_capacity(envelope.len() + 4);
    frame.put_u16(V2_MAGIC);
    frame.put_u16(len);
    frame.put_slice(&envelope);
    Ok(frame)
}

pub fn check_ack(ack: &str) -> ProtocolResult<()> {
    let parsed: Ack = serde_json::from_str(ack.trim()).map_err(|_| {
        ProtocolError::Rejected(format!("unparseable acknowledgement '{}'", ack.trim()))
    })?;

    if parsed.status.eq_ignore_ascii_case("ok") {
        return Ok(());
    }

    let reason = parsed
        .cause
        .or(parsed.error)
        .unwrap_or_else(|| format!("status '{}'", parsed.status));
    Err(ProtocolError::Rejected(reason))
}
