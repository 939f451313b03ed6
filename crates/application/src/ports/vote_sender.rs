use async_trait::async_trait;
use mcgate_domain::{DomainError, VoteRequest};

#[async_trait]
pub trait VoteSender: Send + Sync {
    /// Delivers one vote. Every failure is surfaced as a `Vote*` error.
    async fn send_vote(&self, request: &VoteRequest) -> Result<(), DomainError>;
}
