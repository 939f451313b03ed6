use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid vote request: {0}")]
    InvalidVote(String),

    #[error("DNS lookup failed: {0}")]
    DnsLookupFailure(String),

    #[error("Vote transport error: {0}")]
    VoteTransportError(String),

    #[error("Vote timed out after {}ms", .0.as_millis())]
    VoteTimeout(Duration),

    #[error("Vote rejected by server: {0}")]
    VoteRejected(String),
}
