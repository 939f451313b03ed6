use crate::address::{Address, SrvRecord};
use crate::edition::Edition;
use crate::motd::Motd;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaVersion {
    pub name: String,
    pub name_clean: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSample {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct JavaPlayers {
    pub online: i64,
    pub max: i64,
    pub sample: Vec<PlayerSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModInfo {
    pub name: String,
    pub version: String,
}

/// Fields gathered through the GameSpy4 full-stat query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct QueryData {
    pub software: Option<String>,
    pub plugins: Vec<String>,
    pub world: Option<String>,
    pub players: Vec<String>,
    pub raw: BTreeMap<String, String>,
}

/// Everything an online Java server reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaServerInfo {
    /// Absent for pre-1.4 servers, which do not report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<JavaVersion>,
    pub players: JavaPlayers,
    pub motd: Motd,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<ModInfo>,
    pub legacy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaStatus {
    online: bool,
    host: String,
    port: u16,
    retrieved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    srv_record: Option<SrvRecord>,
    #[serde(flatten)]
    info: Option<JavaServerInfo>,
}

impl JavaStatus {
    pub fn offline(address: &Address) -> Self {
        Self {
            online: false,
            host: address.host.clone(),
            port: address.port,
            retrieved_at: Utc::now(),
            srv_record: address.srv.clone(),
            info: None,
        }
    }

    pub fn online(address: &Address, info: JavaServerInfo) -> Self {
        Self {
            online: true,
            info: Some(info),
            ..Self::offline(address)
        }
    }

    /// Attaches query results. Offline statuses stay bare.
    pub fn with_query(mut self, query: QueryData) -> Self {
        if let Some(info) = self.info.as_mut() {
            info.query = Some(query);
        }
        self
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }

    pub fn srv_record(&self) -> Option<&SrvRecord> {
        self.srv_record.as_ref()
    }

    pub fn info(&self) -> Option<&JavaServerInfo> {
        self.info.as_ref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.info.as_ref().and_then(|info| info.icon.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct BedrockPlayers {
    pub online: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedrockServerInfo {
    /// `MCPE` or `MCEE`.
    pub edition: String,
    pub motd: Motd,
    pub protocol_version: i32,
    pub version: String,
    pub players: BedrockPlayers,
    pub server_id: Option<String>,
    pub level_name: Option<String>,
    pub gamemode: Option<String>,
    pub gamemode_id: Option<i32>,
    pub port_ipv4: Option<u16>,
    pub port_ipv6: Option<u16>,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedrockStatus {
    online: bool,
    host: String,
    port: u16,
    retrieved_at: DateTime<Utc>,
    #[serde(flatten)]
    info: Option<BedrockServerInfo>,
}

impl BedrockStatus {
    pub fn offline(address: &Address) -> Self {
        Self {
            online: false,
            host: address.host.clone(),
            port: address.port,
            retrieved_at: Utc::now(),
            info: None,
        }
    }

    pub fn online(address: &Address, info: BedrockServerInfo) -> Self {
        Self {
            online: true,
            info: Some(info),
            ..Self::offline(address)
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }

    pub fn info(&self) -> Option<&BedrockServerInfo> {
        self.info.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusResult {
    Java(JavaStatus),
    Bedrock(BedrockStatus),
}

impl StatusResult {
    pub fn offline(address: &Address) -> Self {
        match address.edition {
            Edition::Java => StatusResult::Java(JavaStatus::offline(address)),
            Edition::Bedrock => StatusResult::Bedrock(BedrockStatus::offline(address)),
        }
    }

    pub fn edition(&self) -> Edition {
        match self {
            StatusResult::Java(_) => Edition::Java,
            StatusResult::Bedrock(_) => Edition::Bedrock,
        }
    }

    pub fn is_online(&self) -> bool {
        match self {
            StatusResult::Java(status) => status.is_online(),
            StatusResult::Bedrock(status) => status.is_online(),
        }
    }

    pub fn retrieved_at(&self) -> DateTime<Utc> {
        match self {
            StatusResult::Java(status) => status.retrieved_at(),
            StatusResult::Bedrock(status) => status.retrieved_at(),
        }
    }

    pub fn as_java(&self) -> Option<&JavaStatus> {
        match self {
            StatusResult::Java(status) => Some(status),
            StatusResult::Bedrock(_) => None,
        }
    }

    pub fn as_bedrock(&self) -> Option<&BedrockStatus> {
        match self {
            StatusResult::Bedrock(status) => Some(status),
            StatusResult::Java(_) => None,
        }
    }
}

impl From<JavaStatus> for StatusResult {
    fn from(status: JavaStatus) -> Self {
        StatusResult::Java(status)
    }
}

impl From<BedrockStatus> for StatusResult {
    fn from(status: BedrockStatus) -> Self {
        StatusResult::Bedrock(status)
    }
}
