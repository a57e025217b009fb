//! Server configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via TURNTABLED_CONFIG)
//! 3. Environment variables

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network configuration.
    pub network: NetworkConfig,
    /// Track catalog configuration.
    pub catalog: CatalogConfig,
}

impl Config {
    /// Loads configuration from file, then applies environment variable
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("TURNTABLED_CONFIG") {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.network.apply_env_overrides();
        self.catalog.apply_env_overrides();
    }
}

/// Network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address to bind to.
    #[serde(with = "socket_addr_serde")]
    pub bind_addr: SocketAddr,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
        }
    }
}

impl NetworkConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("TURNTABLED_BIND") {
            if let Ok(parsed) = addr.parse() {
                self.bind_addr = parsed;
            }
        }
    }
}

/// Track catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the JSON track list.
    pub tracks_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tracks_path: PathBuf::from("./config/tracks.json"),
        }
    }
}

impl CatalogConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("TURNTABLED_TRACKS") {
            self.tracks_path = PathBuf::from(path);
        }
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file '{}': {}", .0.display(), .1)]
    Parse(PathBuf, String),
}

/// Custom serde module for SocketAddr (to handle as string in YAML).
mod socket_addr_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::net::SocketAddr;

    pub fn serialize<S>(addr: &SocketAddr, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&addr.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SocketAddr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
