//! HTTP clients for the services a lookup talks to.
//!
//! This module provides typed clients for:
//! - Solana cluster nodes (JSON-RPC) - accounts, transactions and blocks
//! - The token metadata gateway - names, symbols and market data
//!
//! Both sit behind traits ([`ChainRpc`], [`MetadataSource`]) so the lookup
//! core can be exercised against in-memory fakes.
//!
//! # Example
//!
//! ```ignore
//! use crate::client::{HttpConfig, RpcEndpoints, SolanaClient};
//!
//! let http = HttpConfig::default().build_client()?;
//! let chain = SolanaClient::new(RpcEndpoints::default(), http);
//! let account = chain.get_account_info(Network::Mainnet, address).await?;
//! ```

pub mod http;
pub mod metadata;
pub mod rpc;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpConfig;
pub use metadata::{DEFAULT_METADATA_API_URL, MetadataClient, MetadataSource};
pub use rpc::{ChainRpc, RpcEndpoints, SolanaClient};
