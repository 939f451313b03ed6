pub mod mock_sweeper;

pub use mock_sweeper::MockCacheSweeper;
