//! Domain types for the solprobe lookup tool.
//!
//! This module contains the core data types used throughout the application:
//! clusters and explorers, search kinds, the per-kind result payloads,
//! history entries and the lookup error taxonomy.
//!
//! # Module Organization
//!
//! - [`error`] - Lookup error types
//! - [`network`] - Cluster and explorer configuration
//! - [`search`] - Search kinds and the tagged lookup result
//! - [`account`] - Raw accounts and account summaries
//! - [`transaction`] - Transactions and their instructions
//! - [`block`] - Blocks and their transaction listings
//! - [`token`] - Token accounts and token metadata
//! - [`history`] - Search history entries

// ============================================================================
// Module Declarations
// ============================================================================

pub mod account;
pub mod block;
pub mod error;
pub mod history;
pub mod network;
pub mod search;
pub mod token;
pub mod transaction;

// ============================================================================
// Re-exports
// ============================================================================

pub use account::{AccountInfo, AccountRecord, LAMPORTS_PER_SOL};
pub use block::BlockInfo;
pub use error::{GENERIC_FAILURE_MESSAGE, LookupError};
pub use history::HistoryEntry;
pub use network::{Explorer, Network};
pub use search::{ResultPayload, SearchKind, SearchResult};
pub use token::{TokenAccountInfo, TokenMetadata, mint_address};
pub use transaction::TransactionInfo;
