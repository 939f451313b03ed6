use std::time::Duration;

/// Freshness metadata returned next to every cached lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMeta {
    pub hit: bool,
    pub ttl_remaining: Duration,
}

impl CacheMeta {
    pub fn hit(ttl_remaining: Duration) -> Self {
        Self {
            hit: true,
            ttl_remaining,
        }
    }

    pub fn miss(ttl_remaining: Duration) -> Self {
        Self {
            hit: false,
            ttl_remaining,
        }
    }

    /// Whole seconds left, rounded down.
    pub fn ttl_remaining_secs(&self) -> u64 {
        self.ttl_remaining.as_secs()
    }
}
