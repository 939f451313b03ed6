use async_trait::async_trait;
use mcgate_domain::{CacheKey, CacheMeta, StatusResult};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub type StatusQuery = Pin<Box<dyn Future<Output = StatusResult> + Send + 'static>>;

/// Builds the query to run on a miss. Only the caller that wins the
/// in-flight slot invokes it.
pub type QueryFactory = Arc<dyn Fn() -> StatusQuery + Send + Sync>;

/// Snapshot of status cache metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Callers that joined a query another caller had already started.
    pub coalesced: u64,
    pub insertions: u64,
    pub expirations: u64,
}

#[async_trait]
pub trait StatusCachePort: Send + Sync {
    /// Returns the live entry for `key`, or runs `query` once for every
    /// concurrent caller and stores the outcome for `ttl`.
    async fn get_or_query(
        &self,
        key: CacheKey,
        ttl: Duration,
        query: QueryFactory,
    ) -> (StatusResult, CacheMeta);

    /// Drops expired entries and returns how many were removed.
    fn sweep(&self) -> usize;

    fn flush(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metrics(&self) -> CacheMetricsSnapshot;
}
