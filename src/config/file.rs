//! Configuration file handling

use super::NetworkConfig;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Selector settings
    #[serde(default)]
    pub settings: SelectorConfig,

    /// Custom networks (shadow built-ins by name)
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,

    /// Network to use when none is given on the command line
    #[serde(default)]
    pub default_network: Option<String>,
}

/// Selector settings
///
/// The probe timeout is deliberately a tunable rather than a constant; a
/// probe that does not complete within it is treated as a failed candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Per-probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

fn default_probe_timeout() -> u64 {
    10
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl SelectorConfig {
    /// Create a config with an explicit probe timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            probe_timeout_secs: timeout.as_secs().max(1),
        }
    }

    /// Per-probe timeout as a [`Duration`]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("net-optimizer")
            .join("config.toml")
    }

    /// Load from default path
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path();
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save to a specific path
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::InvalidFile(format!("Failed to create directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Look up a custom network by name
    pub fn find_network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
default_network = "mainnet"

[settings]
probe_timeout_secs = 5

[[networks]]
name = "staging"
chain_id = "dydx-testnet-4"
node_urls = ["https://rpc.staging.example.com"]
indexer_urls = ["https://indexer.staging.example.com"]
"#;

        let config: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.probe_timeout_secs, 5);
        assert_eq!(config.default_network.as_deref(), Some("mainnet"));

        let staging = config.find_network("staging").unwrap();
        assert_eq!(staging.chain_id, "dydx-testnet-4");
        assert_eq!(staging.node_urls.len(), 1);
        assert!(config.find_network("missing").is_none());
    }

    #[test]
    fn test_settings_default() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config.settings.probe_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_path() {
        let path = ConfigFile::default_path();
        assert!(path.to_string_lossy().contains("net-optimizer"));
    }
}
