#![allow(dead_code)]
use chrono::{TimeZone, Utc};
use mcgate_domain::{VoteCredential, VoteRequest, VoteVersion};
use std::time::Duration;

pub struct VoteRequestBuilder {
    version: VoteVersion,
    host: String,
    port: u16,
    service_name: String,
    username: String,
    credential: VoteCredential,
    ip_address: String,
    timeout: Duration,
}

impl VoteRequestBuilder {
    pub fn v1() -> Self {
        Self {
            version: VoteVersion::V1,
            host: "vote.example.com".to_string(),
            port: 8192,
            service_name: "TopServers".to_string(),
            username: "Notch".to_string(),
            credential: VoteCredential::PublicKey("MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8A".to_string()),
            ip_address: "203.0.113.7".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    pub fn v2() -> Self {
        Self {
            version: VoteVersion::V2,
            credential: VoteCredential::Token("s3cr3t-token".to_string()),
            ..Self::v1()
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn credential(mut self, credential: VoteCredential) -> Self {
        self.credential = credential;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> VoteRequest {
        VoteRequest {
            version: self.version,
            host: self.host,
            port: self.port,
            service_name: self.service_name,
            username: self.username,
            credential: self.credential,
            ip_address: self.ip_address,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            timeout: self.timeout,
        }
    }
}
