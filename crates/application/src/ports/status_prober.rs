use async_trait::async_trait;
use mcgate_domain::{Address, StatusOptions, StatusResult};
use std::time::Duration;

/// One edition's status protocol.
///
/// Probing never fails: unreachable, slow or misbehaving servers come back as
/// an offline [`StatusResult`] for the same address.
#[async_trait]
pub trait StatusProber: Send + Sync {
    async fn probe(
        &self,
        address: &Address,
        options: &StatusOptions,
        timeout: Duration,
    ) -> StatusResult;
}
