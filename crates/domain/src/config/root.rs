use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::protocol::{BedrockConfig, JavaConfig};
use super::srv::SrvConfig;

/// Main configuration structure for mcgate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub java: JavaConfig,

    #[serde(default)]
    pub bedrock: BedrockConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub srv: SrvConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. mcgate.toml in current directory
    /// 3. /etc/mcgate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("mcgate.toml").exists() {
            Self::from_file("mcgate.toml")?
        } else if std::path::Path::new("/etc/mcgate/config.toml").exists() {
            Self::from_file("/etc/mcgate/config.toml")?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.java.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "java.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.bedrock.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "bedrock.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.srv.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "srv.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.sweep_interval_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(ns) = &self.srv.nameserver {
            if ns.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "srv.nameserver '{}' is not an ip:port pair",
                    ns
                )));
            }
        }

        Ok(())
    }
}
