#![allow(dead_code)]

use async_trait::async_trait;
use mcgate_application::ports::{
    CacheMetricsSnapshot, QueryFactory, SrvResolver, StatusCachePort, StatusProber, VoteSender,
};
use mcgate_domain::{
    Address, CacheKey, CacheMeta, DomainError, Edition, JavaPlayers, JavaServerInfo, JavaStatus,
    JavaVersion, Motd, SrvRecord, StatusOptions, StatusResult, VoteRequest,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub fn online_java(address: &Address, icon: Option<String>) -> StatusResult {
    StatusResult::Java(JavaStatus::online(
        address,
        JavaServerInfo {
            version: Some(JavaVersion {
                name: "1.20.4".to_string(),
                name_clean: "1.20.4".to_string(),
                protocol: 765,
            }),
            players: JavaPlayers {
                online: 5,
                max: 100,
                sample: vec![],
            },
            motd: Motd::from_legacy("A Minecraft Server"),
            icon,
            latency_ms: 7,
            mods: vec![],
            legacy: false,
            query: None,
        },
    ))
}

/// Prober that records every address it was asked about.
pub struct MockStatusProber {
    edition: Edition,
    online: bool,
    icon: Option<String>,
    calls: AtomicUsize,
    probed: Mutex<Vec<Address>>,
}

impl MockStatusProber {
    pub fn online(edition: Edition) -> Self {
        Self {
            edition,
            online: true,
            icon: None,
            calls: AtomicUsize::new(0),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn offline(edition: Edition) -> Self {
        Self {
            online: false,
            ..Self::online(edition)
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn probed(&self) -> Vec<Address> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusProber for MockStatusProber {
    async fn probe(
        &self,
        address: &Address,
        _options: &StatusOptions,
        _timeout: Duration,
    ) -> StatusResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.probed.lock().unwrap().push(address.clone());

        if self.online && self.edition == Edition::Java {
            online_java(address, self.icon.clone())
        } else {
            StatusResult::offline(address)
        }
    }
}

pub struct MockSrvResolver {
    records: HashMap<String, SrvRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockSrvResolver {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_record(mut self, host: &str, target: &str, port: u16) -> Self {
        self.records.insert(
            host.to_string(),
            SrvRecord {
                host: target.to_string(),
                port,
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SrvResolver for MockSrvResolver {
    async fn lookup_srv(&self, host: &str) -> Result<Option<SrvRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::DnsLookupFailure(format!(
                "no nameserver reachable for {}",
                host
            )));
        }
        Ok(self.records.get(host).cloned())
    }
}

pub struct MockVoteSender {
    result: Result<(), DomainError>,
    calls: AtomicUsize,
}

impl MockVoteSender {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoteSender for MockVoteSender {
    async fn send_vote(&self, _request: &VoteRequest) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Plain TTL map without single-flight; enough for use case tests.
pub struct InMemoryStatusCache {
    entries: Mutex<HashMap<CacheKey, (StatusResult, Instant, Duration)>>,
}

impl InMemoryStatusCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl StatusCachePort for InMemoryStatusCache {
    async fn get_or_query(
        &self,
        key: CacheKey,
        ttl: Duration,
        query: QueryFactory,
    ) -> (StatusResult, CacheMeta) {
        let now = Instant::now();
        if let Some((value, stored_at, ttl)) = self.entries.lock().unwrap().get(&key).cloned() {
            let age = now.duration_since(stored_at);
            if age < ttl {
                return (value, CacheMeta::hit(ttl - age));
            }
        }

        let value = query().await;
        self.entries
            .lock()
            .unwrap()
            .insert(key, (value.clone(), Instant::now(), ttl));
        (value, CacheMeta::miss(ttl))
    }

    fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, (_, stored_at, ttl)| now.duration_since(*stored_at) < *ttl);
        before - entries.len()
    }

    fn flush(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn metrics(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            entries: self.len(),
            ..CacheMetricsSnapshot::default()
        }
    }
}

pub struct Mocks {
    pub java: Arc<MockStatusProber>,
    pub bedrock: Arc<MockStatusProber>,
    pub votifier: Arc<MockVoteSender>,
    pub srv: Arc<MockSrvResolver>,
    pub cache: Arc<InMemoryStatusCache>,
}

impl Mocks {
    pub fn new(java: MockStatusProber, srv: MockSrvResolver) -> Self {
        Self {
            java: Arc::new(java),
            bedrock: Arc::new(MockStatusProber::online(Edition::Bedrock)),
            votifier: Arc::new(MockVoteSender::succeeding()),
            srv: Arc::new(srv),
            cache: Arc::new(InMemoryStatusCache::new()),
        }
    }

    pub fn components(&self) -> mcgate_application::GatewayComponents {
        mcgate_application::GatewayComponents {
            java: self.java.clone(),
            bedrock: self.bedrock.clone(),
            votifier: self.votifier.clone(),
            srv_resolver: Some(self.srv.clone()),
            cache: self.cache.clone(),
        }
    }
}
