pub mod cache_sweep;
pub mod runner;

pub use cache_sweep::CacheSweepJob;
pub use runner::JobRunner;
