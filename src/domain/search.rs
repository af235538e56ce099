//! Search kinds and the normalized lookup result.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::account::AccountInfo;
use super::block::BlockInfo;
use super::network::Network;
use super::token::TokenAccountInfo;
use super::transaction::TransactionInfo;

// ============================================================================
// Search Kind
// ============================================================================

/// The semantic kind of a query.
///
/// Decides which resolver branch fetches the entity and which formatter
/// branch renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// A plain account address.
    #[default]
    Address,
    /// A transaction signature.
    Transaction,
    /// A block, addressed by slot number.
    Block,
    /// An account owned by the SPL Token program.
    Token,
}

impl SearchKind {
    /// Returns the lowercase identifier used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Transaction => "transaction",
            Self::Block => "block",
            Self::Token => "token",
        }
    }

    /// Returns the capitalised name used in result subtitles.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Address => "Address",
            Self::Transaction => "Transaction",
            Self::Block => "Block",
            Self::Token => "Token",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "address" | "account" => Ok(Self::Address),
            "transaction" | "tx" => Ok(Self::Transaction),
            "block" => Ok(Self::Block),
            "token" => Ok(Self::Token),
            other => Err(format!(
                "unknown kind '{other}' (expected address, transaction, block or token)"
            )),
        }
    }
}

// ============================================================================
// Search Result
// ============================================================================

/// Kind-specific data carried by a [`SearchResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPayload {
    /// Account metadata for an address lookup.
    Address(AccountInfo),
    /// A fetched transaction.
    Transaction(TransactionInfo),
    /// A fetched block.
    Block(BlockInfo),
    /// A token account with its mint and optional metadata.
    Token(TokenAccountInfo),
}

/// A resolved query, tagged with the cluster it was resolved against.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Cluster the data was fetched from.
    pub network: Network,
    /// The entity itself.
    pub payload: ResultPayload,
}

impl SearchResult {
    #[must_use]
    pub const fn new(network: Network, payload: ResultPayload) -> Self {
        Self { network, payload }
    }

    /// The kind is derived from the payload variant, so the two can never
    /// disagree.
    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        match self.payload {
            ResultPayload::Address(_) => SearchKind::Address,
            ResultPayload::Transaction(_) => SearchKind::Transaction,
            ResultPayload::Block(_) => SearchKind::Block,
            ResultPayload::Token(_) => SearchKind::Token,
        }
    }

    /// Subtitle shown next to a result, e.g. `Token • Devnet`.
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!(
            "{} • {}",
            self.kind().display_name(),
            self.network.display_name()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AccountMother, BlockMother};

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            SearchKind::Address,
            SearchKind::Transaction,
            SearchKind::Block,
            SearchKind::Token,
        ] {
            assert_eq!(kind.as_str().parse::<SearchKind>().unwrap(), kind);
        }
        assert!("nft".parse::<SearchKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SearchKind::Transaction).unwrap(),
            "\"transaction\""
        );
    }

    #[test]
    fn test_result_kind_follows_payload() {
        let result = SearchResult::new(
            Network::Devnet,
            ResultPayload::Address(AccountMother::system("ADDR")),
        );
        assert_eq!(result.kind(), SearchKind::Address);
        assert_eq!(result.subtitle(), "Address • Devnet");

        let block = SearchResult::new(
            Network::Mainnet,
            ResultPayload::Block(BlockMother::with_transactions(1, 0)),
        );
        assert_eq!(block.kind(), SearchKind::Block);
        assert_eq!(block.subtitle(), "Block • Mainnet");
    }
}
