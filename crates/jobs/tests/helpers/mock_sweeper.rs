#![allow(dead_code)]

use mcgate_application::ports::{CacheSweepOutcome, CacheSweepPort};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Reports `expired` removals on its first cycle and none afterwards.
pub struct MockCacheSweeper {
    calls: AtomicU64,
    expired: AtomicUsize,
    size: AtomicUsize,
}

impl MockCacheSweeper {
    pub fn new() -> Self {
        Self::with_expired(0, 0)
    }

    pub fn with_expired(expired: usize, size: usize) -> Self {
        Self {
            calls: AtomicU64::new(0),
            expired: AtomicUsize::new(expired),
            size: AtomicUsize::new(size),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }
}

impl CacheSweepPort for MockCacheSweeper {
    fn run_sweep_cycle(&self) -> CacheSweepOutcome {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let removed = self.expired.swap(0, Ordering::Relaxed);
        let size = self.size.fetch_sub(removed, Ordering::Relaxed) - removed;
        CacheSweepOutcome {
            entries_removed: removed,
            cache_size: size,
        }
    }
}
