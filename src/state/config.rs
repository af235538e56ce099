//! Application configuration with persistence.
//!
//! This module provides the [`AppConfig`] structure for user settings that
//! apply to every invocation: the preferred explorer, RPC endpoint overrides
//! and the token metadata service.
//!
//! # Configuration File Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/solprobe/config.json`
//! - macOS: `~/Library/Application Support/solprobe/config.json`
//! - Windows: `%APPDATA%/solprobe/config.json`
//!
//! # Example
//!
//! ```ignore
//! use crate::state::AppConfig;
//!
//! let mut config = AppConfig::load();
//! config.explorer = Explorer::Solscan;
//! config.save()?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::client::http::DEFAULT_TIMEOUT_SECS;
use crate::client::{DEFAULT_METADATA_API_URL, HttpConfig, RpcEndpoints};
use crate::domain::{Explorer, Network};

use super::platform::paths::AppPaths;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable that overrides the stored metadata API key.
pub const METADATA_API_KEY_ENV: &str = "SOLPROBE_METADATA_API_KEY";

// ============================================================================
// AppConfig
// ============================================================================

/// Per-network RPC endpoint overrides. Unset networks use the public
/// cluster endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mainnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet: Option<String>,
}

/// Application configuration structure for persistence.
///
/// Every field has a default, so partial or older files still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Explorer that links are built for.
    pub explorer: Explorer,
    /// RPC endpoint overrides.
    pub rpc_urls: RpcUrls,
    /// Credential for the token metadata service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_api_key: Option<String>,
    /// Base URL of the token metadata service.
    pub metadata_api_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            explorer: Explorer::default(),
            rpc_urls: RpcUrls::default(),
            metadata_api_key: None,
            metadata_api_url: DEFAULT_METADATA_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        AppPaths::new().config_file()
    }

    /// Loads the configuration from disk.
    ///
    /// If the configuration file doesn't exist or cannot be parsed,
    /// returns the default configuration.
    #[must_use]
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("config load failed, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Attempts to load the configuration from disk. A missing file yields
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration path cannot be determined
    /// - The file exists but cannot be read
    /// - The JSON content cannot be parsed
    pub fn try_load() -> Result<Self> {
        Self::try_load_from(&Self::config_path()?)
    }

    /// Loads the configuration stored at `path`. A missing file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration path cannot be determined
    /// - The configuration cannot be serialized
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// RPC endpoints with overrides applied.
    #[must_use]
    pub fn rpc_endpoints(&self) -> RpcEndpoints {
        let pick = |url: &Option<String>, network: Network| {
            url.as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .unwrap_or(network.default_rpc_url())
                .to_string()
        };

        RpcEndpoints {
            mainnet: pick(&self.rpc_urls.mainnet, Network::Mainnet),
            devnet: pick(&self.rpc_urls.devnet, Network::Devnet),
            testnet: pick(&self.rpc_urls.testnet, Network::Testnet),
        }
    }

    /// HTTP settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::with_timeout(Duration::from_secs(self.request_timeout_secs.max(1)))
    }

    /// The metadata API key, preferring [`METADATA_API_KEY_ENV`].
    #[must_use]
    pub fn metadata_api_key(&self) -> Option<String> {
        self.metadata_api_key_with(std::env::var(METADATA_API_KEY_ENV).ok())
    }

    /// The metadata API key given the environment override `env_value`.
    #[must_use]
    pub fn metadata_api_key_with(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.metadata_api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
