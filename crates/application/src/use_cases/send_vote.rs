use crate::ports::VoteSender;
use mcgate_domain::{DomainError, VoteRequest};
use std::sync::Arc;
use tracing::{info, warn};

pub struct SendVoteUseCase {
    sender: Arc<dyn VoteSender>,
}

impl SendVoteUseCase {
    pub fn new(sender: Arc<dyn VoteSender>) -> Self {
        Self { sender }
    }

    pub async fn execute(&self, request: &VoteRequest) -> Result<(), DomainError> {
        request.validate()?;

        match self.sender.send_vote(request).await {
            Ok(()) => {
                info!(
                    host = %request.host,
                    port = request.port,
                    version = ?request.version,
                    service = %request.service_name,
                    username = %request.username,
                    "Vote delivered"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    host = %request.host,
                    port = request.port,
                    version = ?request.version,
                    error = %e,
                    "Vote failed"
                );
                Err(e)
            }
        }
    }
}
