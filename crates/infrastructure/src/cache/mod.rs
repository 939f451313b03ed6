pub mod metrics;
pub mod status_cache;

pub use metrics::CacheMetrics;
pub use status_cache::StatusCache;
