//! mcgate infrastructure: wire protocol clients, the status cache and SRV lookup.
pub mod cache;
pub mod di;
pub mod dns;
pub mod protocol;

pub use cache::StatusCache;
pub use di::{build_components, build_gateway};
pub use dns::UdpSrvResolver;
pub use protocol::bedrock::BedrockStatusClient;
pub use protocol::java::JavaStatusClient;
pub use protocol::votifier::VotifierClient;
