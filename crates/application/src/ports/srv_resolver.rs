use async_trait::async_trait;
use mcgate_domain::{DomainError, SrvRecord};

#[async_trait]
pub trait SrvResolver: Send + Sync {
    /// Looks up `_minecraft._tcp.<host>`. `Ok(None)` when no record exists.
    async fn lookup_srv(&self, host: &str) -> Result<Option<SrvRecord>, DomainError>;
}
