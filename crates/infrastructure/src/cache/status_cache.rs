use super::metrics::CacheMetrics;
use async_trait::async_trait;
use dashmap::DashMap;
use mcgate_application::ports::{CacheMetricsSnapshot, QueryFactory, StatusCachePort};
use mcgate_domain::{CacheKey, CacheMeta, StatusResult};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Rounds of joining an in-flight query before querying inline.
const MAX_JOIN_ATTEMPTS: usize = 3;

struct CacheEntry {
    value: StatusResult,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: StatusResult, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

type EntryMap = DashMap<CacheKey, Arc<CacheEntry>, FxBuildHasher>;
type InflightSender = Arc<watch::Sender<Option<Arc<CacheEntry>>>>;
type InflightReceiver = watch::Receiver<Option<Arc<CacheEntry>>>;
type InflightMap = DashMap<CacheKey, InflightSender, FxBuildHasher>;

enum Claim {
    Cached(StatusResult, Duration),
    Leader(InflightSender, InflightReceiver),
    Follower(InflightReceiver),
}

/// Releases the in-flight slot if the query task ends without publishing,
/// so waiters wake up instead of hanging.
struct InflightLeaderGuard {
    inflight: Arc<InflightMap>,
    key: CacheKey,
    tx: InflightSender,
    completed: bool,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        self.inflight
            .remove_if(&self.key, |_, tx| Arc::ptr_eq(tx, &self.tx));
        self.tx.send_replace(None);
    }
}

/// TTL cache of status results with single-flight misses.
///
/// Queries run on their own task, so a caller that gives up does not cancel
/// the lookup for everyone else waiting on it.
pub struct StatusCache {
    entries: Arc<EntryMap>,
    inflight: Arc<InflightMap>,
    metrics: Arc<CacheMetrics>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    fn lookup_live(&self, key: &CacheKey) -> Option<(StatusResult, Duration)> {
        let entry = Arc::clone(self.entries.get(key)?.value());
        let now = Instant::now();

        if entry.is_expired(now) {
            let removed = self
                .entries
                .remove_if(key, |_, current| Arc::ptr_eq(current, &entry));
            if removed.is_some() {
                self.metrics.record_expirations(1);
            }
            return None;
        }

        Some((entry.value.clone(), entry.remaining(now)))
    }

    fn claim(&self, key: &CacheKey) -> Claim {
        if let Some((value, remaining)) = self.lookup_live(key) {
            return Claim::Cached(value, remaining);
        }

        match self.inflight.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                Claim::Follower(rx)
            }
            dashmap::Entry::Vacant(e) => {
                // A leader may have published between the lookup and the lock.
                if let Some((value, remaining)) = self.lookup_live(key) {
                    return Claim::Cached(value, remaining);
                }
                let (tx, rx) = watch::channel(None::<Arc<CacheEntry>>);
                let tx = Arc::new(tx);
                e.insert(Arc::clone(&tx));
                Claim::Leader(tx, rx)
            }
        }
    }

    fn spawn_query(&self, key: CacheKey, ttl: Duration, query: QueryFactory, tx: InflightSender) {
        let entries = Arc::clone(&self.entries);
        let inflight = Arc::clone(&self.inflight);
        let metrics = Arc::clone(&self.metrics);

        tokio::spawn(async move {
            let mut guard = InflightLeaderGuard {
                inflight: Arc::clone(&inflight),
                key: key.clone(),
                tx: Arc::clone(&tx),
                completed: false,
            };

            let value = query().await;
            let entry = Arc::new(CacheEntry::new(value, ttl));

            entries.insert(key.clone(), Arc::clone(&entry));
            metrics.record_insertion();
            inflight.remove_if(&key, |_, current| Arc::ptr_eq(current, &tx));
            tx.send_replace(Some(entry));
            guard.completed = true;

            debug!(key = %key, ttl_secs = ttl.as_secs(), "Status cached");
        });
    }

    async fn await_inflight(mut rx: InflightReceiver) -> Option<Arc<CacheEntry>> {
        loop {
            if let Some(entry) = rx.borrow_and_update().clone() {
                return Some(entry);
            }
            if rx.changed().await.is_err() {
                return rx.borrow().clone();
            }
        }
    }

    async fn query_inline(
        &self,
        key: CacheKey,
        ttl: Duration,
        query: QueryFactory,
    ) -> (StatusResult, CacheMeta) {
        self.metrics.record_miss();
        let value = query().await;
        self.entries
            .insert(key, Arc::new(CacheEntry::new(value.clone(), ttl)));
        self.metrics.record_insertion();
        (value, CacheMeta::miss(ttl))
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusCachePort for StatusCache {
    async fn get_or_query(
        &self,
        key: CacheKey,
        ttl: Duration,
        query: QueryFactory,
    ) -> (StatusResult, CacheMeta) {
        for _ in 0..MAX_JOIN_ATTEMPTS {
            let rx = match self.claim(&key) {
                Claim::Cached(value, remaining) => {
                    self.metrics.record_hit();
                    return (value, CacheMeta::hit(remaining));
                }
                Claim::Leader(tx, rx) => {
                    self.metrics.record_miss();
                    self.spawn_query(key.clone(), ttl, Arc::clone(&query), tx);
                    rx
                }
                Claim::Follower(rx) => {
                    self.metrics.record_coalesced();
                    rx
                }
            };

            if let Some(entry) = Self::await_inflight(rx).await {
                let remaining = entry.remaining(Instant::now());
                return (entry.value.clone(), CacheMeta::miss(remaining));
            }
            debug!(key = %key, "In-flight status query ended without a result");
        }

        warn!(key = %key, "Giving up on shared status query, querying inline");
        self.query_inline(key, ttl, query).await
    }

    fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0usize;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        self.metrics.record_expirations(removed);
        removed
    }

    fn flush(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.entries.len())
    }
}
