//! Votifier v1: an RSA PKCS#1 v1.5 encrypted vote block, no acknowledgement.

use super::read_greeting;
use crate::protocol::errors::{ProtocolError, ProtocolResult};
use crate::protocol::net::{connect_tcp, with_deadline};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mcgate_domain::VoteRequest;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::time::Instant;

/// How long to watch for a reset after the ciphertext is written.
const RESET_GRACE: Duration = Duration::from_millis(250);

pub(super) async fn send(
    request: &VoteRequest,
    public_key: &str,
    deadline: Instant,
) -> ProtocolResult<()> {
    let key = parse_public_key(public_key)?;
    let block = vote_block(request);
    let ciphertext = key
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, block.as_bytes())
        .map_err(|e| ProtocolError::InvalidKey(format!("cannot encrypt vote: {}", e)))?;

    let stream = connect_tcp(&request.host, request.port, deadline).await?;
    let mut stream = BufReader::new(stream);
    read_greeting(&mut stream, deadline).await?;

    with_deadline(deadline, stream.write_all(&ciphertext)).await?;
    with_deadline(deadline, stream.flush()).await?;
    with_deadline(deadline, stream.shutdown()).await?;

    // The listener never answers; a reset is the only failure signal left.
    let grace = deadline.min(Instant::now() + RESET_GRACE);
    let mut probe = [0u8; 1];
    match tokio::time::timeout_at(grace, stream.read(&mut probe)).await {
        Ok(Err(e)) => Err(ProtocolError::Io(e)),
        Ok(Ok(_)) | Err(_) => Ok(()),
    }
}

/// `VOTE\n<service>\n<username>\n<ip>\n<unix seconds>\n`
pub fn vote_block(request: &VoteRequest) -> String {
    format!(
        "VOTE\n{}\n{}\n{}\n{}\n",
        request.service_name,
        request.username,
        request.ip_address,
        request.timestamp.timestamp()
    )
}

/// Accepts PEM or bare base64 DER, as X.509 SubjectPublicKeyInfo or PKCS#1.
pub fn parse_public_key(input: &str) -> ProtocolResult<RsaPublicKey> {
    let input = input.trim();

    if input.starts_with("-----BEGIN") {
        return RsaPublicKey::from_public_key_pem(input)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(input))
            .map_err(|e| ProtocolError::InvalidKey(format!("bad PEM public key: {}", e)));
    }

    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let der = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ProtocolError::InvalidKey(format!("public key is not base64: {}", e)))?;

    RsaPublicKey::from_public_key_der(&der)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
        .map_err(|e| ProtocolError::InvalidKey(format!("bad DER public key: {}", e)))
}
