//! JSON-RPC client for Solana cluster nodes.
//!
//! Only the three read calls the lookup needs are implemented:
//! `getAccountInfo`, `getTransaction` and `getBlock`.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{AccountRecord, BlockInfo, LookupError, Network, TransactionInfo};

// ============================================================================
// Constants
// ============================================================================

/// JSON-RPC codes a node uses when a slot holds no retrievable block.
const BLOCK_UNAVAILABLE_CODES: [i64; 3] = [
    -32004, // block not available for slot
    -32007, // slot skipped
    -32009, // slot missing in long-term storage
];

// ============================================================================
// Trait
// ============================================================================

/// Read access to a Solana cluster.
///
/// Every call takes the cluster to query, so one client serves all networks.
/// A `None` result means the entity does not exist on that cluster.
pub trait ChainRpc: Send + Sync {
    /// Fetch an account by its base-58 address.
    fn get_account_info(
        &self,
        network: Network,
        address: &str,
    ) -> impl Future<Output = Result<Option<AccountRecord>, LookupError>> + Send;

    /// Fetch a confirmed transaction by signature.
    fn get_transaction(
        &self,
        network: Network,
        signature: &str,
    ) -> impl Future<Output = Result<Option<TransactionInfo>, LookupError>> + Send;

    /// Fetch a confirmed block by slot.
    fn get_block(
        &self,
        network: Network,
        slot: u64,
    ) -> impl Future<Output = Result<Option<BlockInfo>, LookupError>> + Send;
}

// ============================================================================
// Endpoints
// ============================================================================

/// RPC endpoint per cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoints {
    pub mainnet: String,
    pub devnet: String,
    pub testnet: String,
}

impl Default for RpcEndpoints {
    fn default() -> Self {
        Self {
            mainnet: Network::Mainnet.default_rpc_url().to_string(),
            devnet: Network::Devnet.default_rpc_url().to_string(),
            testnet: Network::Testnet.default_rpc_url().to_string(),
        }
    }
}

impl RpcEndpoints {
    #[must_use]
    pub fn url(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Devnet => &self.devnet,
            Network::Testnet => &self.testnet,
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

// ============================================================================
// Solana Client
// ============================================================================

/// `reqwest`-backed [`ChainRpc`] implementation.
#[derive(Debug)]
pub struct SolanaClient {
    endpoints: RpcEndpoints,
    client: Client,
    next_id: AtomicU64,
}

impl SolanaClient {
    #[must_use]
    pub fn new(endpoints: RpcEndpoints, client: Client) -> Self {
        Self {
            endpoints,
            client,
            next_id: AtomicU64::new(1),
        }
    }

    /// Perform one JSON-RPC call and return its `result` member.
    ///
    /// A `null` result is returned as `Value::Null`.
    async fn call(
        &self,
        network: Network,
        method: &str,
        params: Value,
    ) -> Result<Value, LookupError> {
        let url = self.endpoints.url(network);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        tracing::debug!(%network, method, "sending RPC request");

        let response: RpcResponse = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            tracing::debug!(code = error.code, message = %error.message, "RPC error response");
            return Err(LookupError::rpc(error.code, error.message));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}

impl ChainRpc for SolanaClient {
    async fn get_account_info(
        &self,
        network: Network,
        address: &str,
    ) -> Result<Option<AccountRecord>, LookupError> {
        let result = self
            .call(
                network,
                "getAccountInfo",
                json!([address, { "encoding": "base64", "commitment": "confirmed" }]),
            )
            .await?;

        let slot = result["context"]["slot"].as_u64();
        match &result["value"] {
            Value::Null => Ok(None),
            value => AccountRecord::from_json(value, slot).map(Some),
        }
    }

    async fn get_transaction(
        &self,
        network: Network,
        signature: &str,
    ) -> Result<Option<TransactionInfo>, LookupError> {
        let result = self
            .call(
                network,
                "getTransaction",
                json!([signature, {
                    "encoding": "jsonParsed",
                    "commitment": "confirmed",
                    "maxSupportedTransactionVersion": 0
                }]),
            )
            .await?;

        if result.is_null() {
            return Ok(None);
        }
        TransactionInfo::from_json(&result).map(Some)
    }

    async fn get_block(
        &self,
        network: Network,
        slot: u64,
    ) -> Result<Option<BlockInfo>, LookupError> {
        let result = self
            .call(
                network,
                "getBlock",
                json!([slot, {
                    "encoding": "json",
                    "commitment": "confirmed",
                    "transactionDetails": "full",
                    "maxSupportedTransactionVersion": 0,
                    "rewards": true
                }]),
            )
            .await;

        match result {
            Ok(Value::Null) => Ok(None),
            Ok(value) => BlockInfo::from_json(slot, &value).map(Some),
            Err(LookupError::Rpc { code, .. }) if BLOCK_UNAVAILABLE_CODES.contains(&code) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
