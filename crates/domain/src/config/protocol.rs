use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Java Edition probe settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JavaConfig {
    /// Budget for one status probe, covering connect, handshake and ping.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry with the pre-1.7 `0xFE 0x01` ping when the modern handshake fails.
    #[serde(default = "default_true")]
    pub legacy_fallback: bool,
}

impl JavaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            legacy_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BedrockConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl BedrockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}
