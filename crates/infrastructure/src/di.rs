use crate::cache::StatusCache;
use crate::dns::UdpSrvResolver;
use crate::protocol::bedrock::BedrockStatusClient;
use crate::protocol::java::JavaStatusClient;
use crate::protocol::votifier::VotifierClient;
use mcgate_application::ports::SrvResolver;
use mcgate_application::{Gateway, GatewayComponents};
use mcgate_domain::Config;
use std::sync::Arc;
use tracing::info;

/// Production adapters for every gateway port.
pub fn build_components(config: &Config) -> GatewayComponents {
    let srv_resolver = if config.srv.enabled {
        Some(Arc::new(UdpSrvResolver::from_config(&config.srv)) as Arc<dyn SrvResolver>)
    } else {
        None
    };

    GatewayComponents {
        java: Arc::new(JavaStatusClient::from_config(&config.java)),
        bedrock: Arc::new(BedrockStatusClient::new()),
        votifier: Arc::new(VotifierClient::new()),
        srv_resolver,
        cache: Arc::new(StatusCache::new()),
    }
}

pub fn build_gateway(config: &Config) -> Gateway {
    info!(
        srv = config.srv.enabled,
        legacy_fallback = config.java.legacy_fallback,
        java_ttl_secs = config.cache.java_ttl_secs,
        bedrock_ttl_secs = config.cache.bedrock_ttl_secs,
        "Initializing gateway"
    );
    Gateway::new(build_components(config), config)
}
