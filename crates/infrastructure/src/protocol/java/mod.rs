mod legacy;
mod query;
mod response;
mod slp;

pub use legacy::parse_legacy_payload;
pub use query::{parse_challenge, parse_full_stat, parse_plugins};

use crate::protocol::errors::ProtocolError;
use async_trait::async_trait;
use mcgate_application::ports::StatusProber;
use mcgate_domain::{Address, JavaConfig, JavaStatus, StatusOptions, StatusResult};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Java Edition status over Server List Ping, with the legacy ping and the
/// GameSpy4 query as optional extras.
pub struct JavaStatusClient {
    legacy_fallback: bool,
}

impl JavaStatusClient {
    pub fn new(legacy_fallback: bool) -> Self {
        Self { legacy_fallback }
    }

    pub fn from_config(config: &JavaConfig) -> Self {
        Self::new(config.legacy_fallback)
    }

    async fn status(&self, address: &Address, deadline: Instant) -> JavaStatus {
        let error = match slp::ping_modern(address, deadline).await {
            Ok(info) => return JavaStatus::online(address, info),
            Err(e) => e,
        };

        let legacy_candidate = matches!(
            error,
            ProtocolError::LegacyServer | ProtocolError::NoResponse
        );
        if !(legacy_candidate && self.legacy_fallback) {
            debug!(server = %address, error = %error, "Java status ping failed");
            return JavaStatus::offline(address);
        }

        debug!(server = %address, reason = %error, "Falling back to legacy ping");
        match legacy::ping_legacy(address, deadline).await {
            Ok(info) => JavaStatus::online(address, info),
            Err(e) => {
                debug!(server = %address, error = %e, "Legacy ping failed");
                JavaStatus::offline(address)
            }
        }
    }
}

impl Default for JavaStatusClient {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl StatusProber for JavaStatusClient {
    async fn probe(
        &self,
        address: &Address,
        options: &StatusOptions,
        timeout: Duration,
    ) -> StatusResult {
        let deadline = Instant::now() + timeout;

        if !options.query {
            return StatusResult::Java(self.status(address, deadline).await);
        }

        let (status, query) = tokio::join!(
            self.status(address, deadline),
            query::query_full_stat(address, deadline)
        );

        let status = match query {
            Ok(data) => status.with_query(data),
            Err(e) => {
                debug!(server = %address, error = %e, "GameSpy4 query failed");
                status
            }
        };
        StatusResult::Java(status)
    }
}
