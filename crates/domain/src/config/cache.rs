use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_status_ttl")]
    pub java_ttl_secs: u64,

    #[serde(default = "default_status_ttl")]
    pub bedrock_ttl_secs: u64,

    #[serde(default = "default_icon_ttl")]
    pub icon_ttl_secs: u64,

    /// How often the background job drops expired entries.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    pub fn java_ttl(&self) -> Duration {
        Duration::from_secs(self.java_ttl_secs)
    }

    pub fn bedrock_ttl(&self) -> Duration {
        Duration::from_secs(self.bedrock_ttl_secs)
    }

    pub fn icon_ttl(&self) -> Duration {
        Duration::from_secs(self.icon_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            java_ttl_secs: default_status_ttl(),
            bedrock_ttl_secs: default_status_ttl(),
            icon_ttl_secs: default_icon_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_status_ttl() -> u64 {
    60
}

fn default_icon_ttl() -> u64 {
    900
}

fn default_sweep_interval() -> u64 {
    60
}
