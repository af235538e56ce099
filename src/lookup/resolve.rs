//! Query resolution.
//!
//! [`Resolver`] classifies a query, fetches the matching entity from the
//! cluster and normalizes it into a [`SearchResult`].

use crate::client::{ChainRpc, MetadataSource};
use crate::domain::{
    AccountInfo, AccountRecord, LookupError, Network, ResultPayload, SearchKind, SearchResult,
    TokenAccountInfo, mint_address,
};

use super::classify::classify;

// ============================================================================
// Resolver
// ============================================================================

/// Resolves queries against a chain client and a metadata source.
#[derive(Debug)]
pub struct Resolver<C, M> {
    chain: C,
    metadata: M,
}

impl<C: ChainRpc, M: MetadataSource> Resolver<C, M> {
    #[must_use]
    pub const fn new(chain: C, metadata: M) -> Self {
        Self { chain, metadata }
    }

    /// Classify `query` against `network` without fetching the entity.
    pub async fn classify(&self, query: &str, network: Network) -> SearchKind {
        classify(&self.chain, query, network).await
    }

    /// Classify and resolve `query`.
    ///
    /// # Errors
    ///
    /// - `LookupError::InvalidInput` for an empty query or one that is not a
    ///   valid key/slot for its kind
    /// - `LookupError::NotFound` if the entity does not exist on `network`
    /// - transport, RPC and parse errors from the chain client
    pub async fn resolve(
        &self,
        query: &str,
        network: Network,
    ) -> Result<SearchResult, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::invalid_input("Search query cannot be empty"));
        }

        let kind = self.classify(query, network).await;
        tracing::debug!(query, %kind, %network, "classified query");
        self.resolve_as(query, kind, network).await
    }

    /// Resolve `query` as an already known `kind`.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::resolve`].
    pub async fn resolve_as(
        &self,
        query: &str,
        kind: SearchKind,
        network: Network,
    ) -> Result<SearchResult, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::invalid_input("Search query cannot be empty"));
        }

        let payload = match kind {
            SearchKind::Address => {
                let record = self.fetch_account(query, network, "Account").await?;
                ResultPayload::Address(AccountInfo::from_record(query, &record))
            }
            SearchKind::Transaction => {
                let txn = self
                    .chain
                    .get_transaction(network, query)
                    .await?
                    .ok_or(LookupError::not_found("Transaction"))?;
                ResultPayload::Transaction(txn)
            }
            SearchKind::Block => {
                let slot = query.parse::<u64>().map_err(|_| {
                    LookupError::invalid_input(format!(
                        "Invalid block number '{query}'. Please enter a valid slot."
                    ))
                })?;
                let block = self
                    .chain
                    .get_block(network, slot)
                    .await?
                    .ok_or(LookupError::not_found("Block"))?;
                ResultPayload::Block(block)
            }
            SearchKind::Token => ResultPayload::Token(self.fetch_token(query, network).await?),
        };

        Ok(SearchResult::new(network, payload))
    }

    async fn fetch_account(
        &self,
        address: &str,
        network: Network,
        entity: &'static str,
    ) -> Result<AccountRecord, LookupError> {
        validate_pubkey(address)?;
        self.chain
            .get_account_info(network, address)
            .await?
            .ok_or(LookupError::not_found(entity))
    }

    async fn fetch_token(
        &self,
        address: &str,
        network: Network,
    ) -> Result<TokenAccountInfo, LookupError> {
        let record = self.fetch_account(address, network, "Token account").await?;
        let mint = mint_address(address, &record);

        let metadata = match &mint {
            Some(mint) => match self.metadata.token_metadata(network, mint).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!("token metadata for {mint} unavailable: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(TokenAccountInfo {
            account: AccountInfo::from_record(address, &record),
            mint,
            metadata,
        })
    }
}

/// Check that `address` decodes to a 32-byte public key.
///
/// # Errors
///
/// Returns `LookupError::InvalidInput` otherwise.
pub fn validate_pubkey(address: &str) -> Result<(), LookupError> {
    match bs58::decode(address).into_vec() {
        Ok(bytes) if bytes.len() == 32 => Ok(()),
        _ => Err(LookupError::invalid_input(format!(
            "'{address}' is not a valid Solana address"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================
