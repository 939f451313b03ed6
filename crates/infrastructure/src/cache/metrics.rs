use mcgate_application::ports::CacheMetricsSnapshot;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// Hot counters first so they share a line away from the cold ones.
#[derive(Default)]
#[repr(align(64))]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub coalesced: AtomicU64,

    pub insertions: AtomicU64,
    pub expirations: AtomicU64,
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn record_coalesced(&self) {
        self.coalesced.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn record_insertion(&self) {
        self.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn record_expirations(&self, count: usize) {
        if count > 0 {
            self.expirations
                .fetch_add(count as u64, AtomicOrdering::Relaxed);
        }
    }

    pub fn snapshot(&self, entries: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            entries,
            hits: self.hits.load(AtomicOrdering::Relaxed),
            misses: self.misses.load(AtomicOrdering::Relaxed),
            coalesced: self.coalesced.load(AtomicOrdering::Relaxed),
            insertions: self.insertions.load(AtomicOrdering::Relaxed),
            expirations: self.expirations.load(AtomicOrdering::Relaxed),
        }
    }
}
