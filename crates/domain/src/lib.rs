//! mcgate domain layer: addresses, status results, votes and configuration.
pub mod address;
pub mod cache_key;
pub mod cache_meta;
pub mod config;
pub mod edition;
pub mod errors;
pub mod motd;
pub mod options;
pub mod status;
pub mod vote;

pub use address::{split_host_port, Address, SrvRecord};
pub use cache_key::{CacheKey, CacheKind};
pub use cache_meta::CacheMeta;
pub use config::{
    BedrockConfig, CacheConfig, Config, ConfigError, JavaConfig, LoggingConfig, SrvConfig,
};
pub use edition::{Edition, DEFAULT_BEDROCK_PORT, DEFAULT_JAVA_PORT};
pub use errors::DomainError;
pub use motd::Motd;
pub use options::StatusOptions;
pub use status::{
    BedrockPlayers, BedrockServerInfo, BedrockStatus, JavaPlayers, JavaServerInfo, JavaStatus,
    JavaVersion, ModInfo, PlayerSample, QueryData, StatusResult,
};
pub use vote::{
    VoteCredential, VoteRequest, VoteVersion, DEFAULT_VOTIFIER_PORT, MAX_VOTE_TIMEOUT,
};
