use crate::ports::{
    CacheMetricsSnapshot, CacheSweepOutcome, CacheSweepPort, SrvResolver, StatusCachePort,
    StatusProber, VoteSender,
};
use crate::services::{AddressResolver, IconExtractor};
use crate::use_cases::{LookupIconUseCase, LookupSettings, LookupStatusUseCase, SendVoteUseCase};
use bytes::Bytes;
use mcgate_domain::{
    CacheMeta, Config, DomainError, Edition, StatusOptions, StatusResult, VoteRequest,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Adapters the Gateway is assembled from.
pub struct GatewayComponents {
    pub java: Arc<dyn StatusProber>,
    pub bedrock: Arc<dyn StatusProber>,
    pub votifier: Arc<dyn VoteSender>,
    pub srv_resolver: Option<Arc<dyn SrvResolver>>,
    pub cache: Arc<dyn StatusCachePort>,
}

/// Entry point for the transport layer.
///
/// Only address and vote errors are returned; unreachable servers show up as
/// offline results.
pub struct Gateway {
    status: Arc<LookupStatusUseCase>,
    icon: LookupIconUseCase,
    vote: SendVoteUseCase,
    icons: IconExtractor,
    cache: Arc<dyn StatusCachePort>,
}

impl Gateway {
    pub fn new(components: GatewayComponents, config: &Config) -> Self {
        let srv = if config.srv.enabled {
            components.srv_resolver
        } else {
            None
        };
        let resolver = Arc::new(AddressResolver::new(srv));

        let status = Arc::new(LookupStatusUseCase::new(
            resolver,
            components.java,
            components.bedrock,
            Arc::clone(&components.cache),
            LookupSettings::from_config(config),
        ));
        let icons = IconExtractor::new();

        Self {
            icon: LookupIconUseCase::new(Arc::clone(&status), icons.clone()),
            vote: SendVoteUseCase::new(components.votifier),
            status,
            icons,
            cache: components.cache,
        }
    }

    pub async fn lookup_status(
        &self,
        edition: Edition,
        raw_address: &str,
        options: StatusOptions,
    ) -> Result<(StatusResult, CacheMeta), DomainError> {
        self.status.execute(edition, raw_address, options).await
    }

    pub async fn lookup_icon(
        &self,
        raw_address: &str,
    ) -> Result<(Bytes, Option<CacheMeta>), DomainError> {
        self.icon.execute(raw_address).await
    }

    pub async fn send_vote(&self, request: &VoteRequest) -> Result<(), DomainError> {
        self.vote.execute(request).await
    }

    pub fn default_icon(&self) -> Bytes {
        self.icons.default_icon()
    }

    pub fn cache_metrics(&self) -> CacheMetricsSnapshot {
        self.cache.metrics()
    }

    pub fn sweep_cache(&self) -> usize {
        self.cache.sweep()
    }

    pub fn shutdown(&self) {
        let entries = self.cache.len();
        self.cache.flush();
        info!(entries, "Status cache flushed");
    }
}

impl CacheSweepPort for Gateway {
    fn run_sweep_cycle(&self) -> CacheSweepOutcome {
        let entries_removed = self.sweep_cache();
        let cache_size = self.cache.len();
        debug!(entries_removed, cache_size, "Cache sweep cycle");
        CacheSweepOutcome {
            entries_removed,
            cache_size,
        }
    }
}
