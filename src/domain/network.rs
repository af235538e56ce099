//! Cluster and explorer configuration.
//!
//! This module defines the supported Solana clusters, their default RPC
//! endpoints, and the block explorers a result can be opened in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Network
// ============================================================================

/// Solana cluster variants.
///
/// The selected cluster decides which RPC endpoint is queried and which
/// cluster suffix is appended to explorer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Mainnet Beta - the production cluster.
    #[default]
    Mainnet,
    /// Devnet - the development cluster.
    Devnet,
    /// Testnet - the validator test cluster.
    Testnet,
}

impl Network {
    /// All clusters in display order.
    #[cfg(test)]
    pub const ALL: [Self; 3] = [Self::Mainnet, Self::Devnet, Self::Testnet];

    /// Returns the lowercase identifier used in storage and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
        }
    }

    /// Returns the capitalised name used in result subtitles.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Devnet => "Devnet",
            Self::Testnet => "Testnet",
        }
    }

    /// Returns the public RPC endpoint for this cluster.
    #[must_use]
    pub const fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!(
                "unknown network '{other}' (expected mainnet, devnet or testnet)"
            )),
        }
    }
}

// ============================================================================
// Explorer
// ============================================================================

/// Block explorers a result can be opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Explorer {
    /// explorer.solana.com
    #[default]
    #[serde(rename = "Solana Explorer")]
    SolanaExplorer,
    /// solscan.io
    #[serde(rename = "Solscan")]
    Solscan,
    /// solana.fm
    #[serde(rename = "SolanaFM")]
    SolanaFm,
}

impl Explorer {
    /// Returns the human-readable explorer name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SolanaExplorer => "Solana Explorer",
            Self::Solscan => "Solscan",
            Self::SolanaFm => "SolanaFM",
        }
    }

    /// Returns the explorer origin, without a trailing slash.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::SolanaExplorer => "https://explorer.solana.com",
            Self::Solscan => "https://solscan.io",
            Self::SolanaFm => "https://solana.fm",
        }
    }

    /// Returns the query-string suffix selecting `network` on this explorer.
    ///
    /// Mainnet is the default everywhere and has no suffix. SolanaFM names
    /// its non-mainnet clusters with a `-solana` postfix.
    #[must_use]
    pub const fn cluster_suffix(&self, network: Network) -> &'static str {
        match (self, network) {
            (_, Network::Mainnet) => "",
            (Self::SolanaFm, Network::Devnet) => "?cluster=devnet-solana",
            (Self::SolanaFm, Network::Testnet) => "?cluster=testnet-solana",
            (_, Network::Devnet) => "?cluster=devnet",
            (_, Network::Testnet) => "?cluster=testnet",
        }
    }
}

impl std::fmt::Display for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Explorer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "solanaexplorer" | "explorer" => Ok(Self::SolanaExplorer),
            "solscan" => Ok(Self::Solscan),
            "solanafm" => Ok(Self::SolanaFm),
            _ => Err(format!(
                "unknown explorer '{s}' (expected solana-explorer, solscan or solanafm)"
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
