mod cache_sweep_port;
mod srv_resolver;
mod status_cache_port;
mod status_prober;
mod vote_sender;

pub use cache_sweep_port::{CacheSweepOutcome, CacheSweepPort};
pub use srv_resolver::SrvResolver;
pub use status_cache_port::{CacheMetricsSnapshot, QueryFactory, StatusCachePort, StatusQuery};
pub use status_prober::StatusProber;
pub use vote_sender::VoteSender;
