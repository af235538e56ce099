//! Token metadata service client.
//!
//! Looks up name, symbol, decimals, logo and market fields for a mint from a
//! Moralis-compatible gateway (`/token/{network}/{address}/metadata`).

use std::future::Future;

use reqwest::Client;
use serde_json::Value;

use crate::domain::{LookupError, Network, TokenMetadata};

// ============================================================================
// Constants
// ============================================================================

/// Default metadata gateway.
pub const DEFAULT_METADATA_API_URL: &str = "https://solana-gateway.moralis.io";

/// Header carrying the service credential.
const API_KEY_HEADER: &str = "X-API-Key";

// ============================================================================
// Trait
// ============================================================================

/// Source of token metadata.
///
/// `Ok(None)` means the source had nothing to offer (e.g. it is not
/// configured); callers treat errors the same way.
pub trait MetadataSource: Send + Sync {
    fn token_metadata(
        &self,
        network: Network,
        address: &str,
    ) -> impl Future<Output = Result<Option<TokenMetadata>, LookupError>> + Send;
}

// ============================================================================
// Metadata Client
// ============================================================================

/// HTTP [`MetadataSource`] authenticated with a static API key.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl MetadataClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
        }
    }

    /// Returns `true` when an API key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn metadata_url(&self, network: Network, address: &str) -> String {
        format!(
            "{}/token/{}/{}/metadata",
            self.base_url,
            network.as_str(),
            address
        )
    }
}

impl MetadataSource for MetadataClient {
    async fn token_metadata(
        &self,
        network: Network,
        address: &str,
    ) -> Result<Option<TokenMetadata>, LookupError> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("metadata API key not configured, skipping lookup");
            return Ok(None);
        };

        let url = self.metadata_url(network, address);
        let json: Value = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Some(TokenMetadata::from_json(&json)))
    }
}
