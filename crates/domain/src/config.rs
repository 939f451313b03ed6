pub mod cache;
pub mod errors;
pub mod logging;
pub mod protocol;
pub mod root;
pub mod srv;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use protocol::{BedrockConfig, JavaConfig};
pub use root::Config;
pub use srv::SrvConfig;
