mod v1;
mod v2;

pub use v1::{parse_public_key, vote_block};
pub use v2::{build_envelope, check_ack, parse_challenge, sign_payload, V2_MAGIC};

use super::errors::{ProtocolError, ProtocolResult};
use super::net::within;
use async_trait::async_trait;
use mcgate_application::ports::VoteSender;
use mcgate_domain::{DomainError, VoteCredential, VoteRequest, VoteVersion};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::time::Instant;
use tracing::debug;

const MAX_LINE_LEN: u64 = 4096;

/// Relays votes to Votifier (v1) and NuVotifier (v2) listeners.
#[derive(Debug, Default)]
pub struct VotifierClient;

impl VotifierClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VoteSender for VotifierClient {
    async fn send_vote(&self, request: &VoteRequest) -> Result<(), DomainError> {
        request.validate()?;

        let timeout = request.effective_timeout();
        let deadline = Instant::now() + timeout;

        let result = match (&request.version, &request.credential) {
            (VoteVersion::V1, VoteCredential::PublicKey(key)) => {
                v1::send(request, key, deadline).await
            }
            (VoteVersion::V2, VoteCredential::Token(token)) => {
                v2::send(request, token, deadline).await
            }
            _ => {
                return Err(DomainError::InvalidVote(
                    "credential does not match Votifier version".to_string(),
                ))
            }
        };

        result.map_err(|e| {
            debug!(host = %request.host, port = request.port, error = %e, "Vote transport failure");
            map_vote_error(e, timeout)
        })
    }
}

fn map_vote_error(error: ProtocolError, timeout: Duration) -> DomainError {
    match error {
        ProtocolError::Timeout => DomainError::VoteTimeout(timeout),
        ProtocolError::Rejected(reason) => DomainError::VoteRejected(reason),
        ProtocolError::InvalidKey(reason) => DomainError::InvalidVote(reason),
        other => DomainError::VoteTransportError(other.to_string()),
    }
}

/// Reads one `\n`-terminated line, without the terminator.
async fn read_line<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    deadline: Instant,
) -> ProtocolResult<String> {
    let mut line = String::new();
    let read = within(deadline, async {
        (&mut *reader)
            .take(MAX_LINE_LEN)
            .read_line(&mut line)
            .await
            .map_err(ProtocolError::from)
    })
    .await?;

    if read == 0 {
        return Err(ProtocolError::NoResponse);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Every Votifier listener opens with `VOTIFIER <version> [challenge]`.
async fn read_greeting<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    deadline: Instant,
) -> ProtocolResult<String> {
    let greeting = read_line(reader, deadline).await?;
    if !greeting.starts_with("VOTIFIER") {
        return Err(ProtocolError::Malformed(format!(
            "unexpected greeting '{}'",
            greeting
        )));
    }
    Ok(greeting)
}
