use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `_minecraft._tcp` SRV discovery for Java addresses given without a port.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SrvConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// `ip:port` of the nameserver to ask. Falls back to the first entry of
    /// `/etc/resolv.conf`, then `1.1.1.1:53`.
    #[serde(default)]
    pub nameserver: Option<String>,

    #[serde(default = "default_srv_timeout_ms")]
    pub timeout_ms: u64,
}

impl SrvConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SrvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nameserver: None,
            timeout_ms: default_srv_timeout_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_srv_timeout_ms() -> u64 {
    2000
}
