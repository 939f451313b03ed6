use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const DEFAULT_VOTIFIER_PORT: u16 = 8192;

/// Upper bound on a single vote round trip, whatever the caller asked for.
pub const MAX_VOTE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteVersion {
    /// RSA-encrypted block, no acknowledgement.
    V1,
    /// NuVotifier HMAC-signed JSON envelope with a JSON acknowledgement.
    V2,
}

impl TryFrom<u8> for VoteVersion {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteVersion::V1),
            2 => Ok(VoteVersion::V2),
            other => Err(DomainError::InvalidVote(format!(
                "unsupported Votifier version {}",
                other
            ))),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum VoteCredential {
    /// Server RSA public key, PEM or bare base64 DER.
    PublicKey(String),
    /// Shared NuVotifier token.
    Token(String),
}

impl std::fmt::Debug for VoteCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteCredential::PublicKey(_) => f.write_str("PublicKey(..)"),
            VoteCredential::Token(_) => f.write_str("Token(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    pub version: VoteVersion,
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub username: String,
    pub credential: VoteCredential,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
    pub timeout: Duration,
}

impl VoteRequest {
    /// Rejects requests that could never succeed, before any I/O.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.host.trim().is_empty() {
            return Err(DomainError::InvalidVote("host is empty".to_string()));
        }
        if self.port == 0 {
            return Err(DomainError::InvalidVote("port must be 1-65535".to_string()));
        }
        if self.service_name.trim().is_empty() {
            return Err(DomainError::InvalidVote("service name is empty".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(DomainError::InvalidVote("username is empty".to_string()));
        }

        match (&self.version, &self.credential) {
            (VoteVersion::V1, VoteCredential::PublicKey(key)) if !key.trim().is_empty() => Ok(()),
            (VoteVersion::V2, VoteCredential::Token(token)) if !token.is_empty() => Ok(()),
            (VoteVersion::V1, _) => Err(DomainError::InvalidVote(
                "Votifier v1 requires a public key".to_string(),
            )),
            (VoteVersion::V2, _) => Err(DomainError::InvalidVote(
                "Votifier v2 requires a token".to_string(),
            )),
        }
    }

    /// Caller timeout capped at [`MAX_VOTE_TIMEOUT`]; zero means the cap.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            MAX_VOTE_TIMEOUT
        } else {
            self.timeout.min(MAX_VOTE_TIMEOUT)
        }
    }
}
