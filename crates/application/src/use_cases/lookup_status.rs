use crate::ports::{QueryFactory, StatusCachePort, StatusProber, StatusQuery};
use crate::services::AddressResolver;
use mcgate_domain::{
    Address, CacheKey, CacheKind, CacheMeta, Config, DomainError, Edition, StatusOptions,
    StatusResult,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// TTLs and probe timeouts applied per lookup.
#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub java_ttl: Duration,
    pub bedrock_ttl: Duration,
    pub icon_ttl: Duration,
    pub java_timeout: Duration,
    pub bedrock_timeout: Duration,
}

impl LookupSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            java_ttl: config.cache.java_ttl(),
            bedrock_ttl: config.cache.bedrock_ttl(),
            icon_ttl: config.cache.icon_ttl(),
            java_timeout: config.java.timeout(),
            bedrock_timeout: config.bedrock.timeout(),
        }
    }

    pub fn ttl_for(&self, kind: CacheKind) -> Duration {
        match kind {
            CacheKind::Java => self.java_ttl,
            CacheKind::Bedrock => self.bedrock_ttl,
            CacheKind::Icon => self.icon_ttl,
        }
    }

    pub fn timeout_for(&self, edition: Edition) -> Duration {
        match edition {
            Edition::Java => self.java_timeout,
            Edition::Bedrock => self.bedrock_timeout,
        }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct LookupStatusUseCase {
    resolver: Arc<AddressResolver>,
    java: Arc<dyn StatusProber>,
    bedrock: Arc<dyn StatusProber>,
    cache: Arc<dyn StatusCachePort>,
    settings: LookupSettings,
}

impl LookupStatusUseCase {
    pub fn new(
        resolver: Arc<AddressResolver>,
        java: Arc<dyn StatusProber>,
        bedrock: Arc<dyn StatusProber>,
        cache: Arc<dyn StatusCachePort>,
        settings: LookupSettings,
    ) -> Self {
        Self {
            resolver,
            java,
            bedrock,
            cache,
            settings,
        }
    }

    pub async fn execute(
        &self,
        edition: Edition,
        raw_address: &str,
        options: StatusOptions,
    ) -> Result<(StatusResult, CacheMeta), DomainError> {
        let address = self.resolver.parse(raw_address, edition)?;
        Ok(self.lookup(CacheKind::from(edition), address, options).await)
    }

    /// Cache-or-probe for an already parsed address. SRV discovery runs
    /// inside the query so cache hits never touch DNS.
    pub(crate) async fn lookup(
        &self,
        kind: CacheKind,
        address: Address,
        options: StatusOptions,
    ) -> (StatusResult, CacheMeta) {
        let key = CacheKey::new(kind, &address.host, address.port, options.query);
        let ttl = self.settings.ttl_for(kind);
        let timeout = self.settings.timeout_for(address.edition);

        let prober = match address.edition {
            Edition::Java => Arc::clone(&self.java),
            Edition::Bedrock => Arc::clone(&self.bedrock),
        };
        let resolver = Arc::clone(&self.resolver);

        let query: QueryFactory = Arc::new(move || -> StatusQuery {
            let prober = Arc::clone(&prober);
            let resolver = Arc::clone(&resolver);
            let address = address.clone();
            Box::pin(async move {
                let address = resolver.discover_srv(address).await;
                prober.probe(&address, &options, timeout).await
            })
        });

        let (status, meta) = self.cache.get_or_query(key.clone(), ttl, query).await;

        debug!(
            key = %key,
            online = status.is_online(),
            cache_hit = meta.hit,
            ttl_remaining_secs = meta.ttl_remaining_secs(),
            "Status lookup complete"
        );

        (status, meta)
    }
}
