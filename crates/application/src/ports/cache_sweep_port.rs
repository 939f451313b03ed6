/// Outcome of a cache sweep cycle.
#[derive(Debug, Default, Clone)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for periodic status cache maintenance.
pub trait CacheSweepPort: Send + Sync {
    fn run_sweep_cycle(&self) -> CacheSweepOutcome;
}
