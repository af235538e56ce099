//! Block types for Solana.

use serde_json::Value;

use super::error::LookupError;

// ============================================================================
// Block Transaction
// ============================================================================

/// A transaction as listed inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockTransaction {
    /// First signature of the transaction.
    pub signature: Option<String>,
    /// First account key after the fee payer.
    pub first_account: Option<String>,
}

impl BlockTransaction {
    /// Parse one entry of a `getBlock` transaction list.
    #[must_use]
    pub fn from_json(tx: &Value) -> Self {
        let transaction = &tx["transaction"];
        let key = &transaction["message"]["accountKeys"][1];
        // `json` encoding yields plain strings, `jsonParsed` yields objects.
        let first_account = key
            .as_str()
            .or_else(|| key["pubkey"].as_str())
            .map(String::from);

        Self {
            signature: transaction["signatures"][0].as_str().map(String::from),
            first_account,
        }
    }
}

// ============================================================================
// Block Info
// ============================================================================

/// A confirmed block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockInfo {
    /// Slot the block was produced in.
    pub slot: u64,
    /// Hash of this block.
    pub blockhash: String,
    /// Hash of the parent block.
    pub previous_blockhash: String,
    /// Slot of the parent block.
    pub parent_slot: u64,
    /// Number of blocks beneath this one.
    pub block_height: Option<u64>,
    /// Production time in seconds since the epoch.
    pub block_time: Option<i64>,
    /// Number of rewards paid out in this block.
    pub rewards_count: usize,
    /// Transactions in block order.
    pub transactions: Vec<BlockTransaction>,
}

impl BlockInfo {
    /// Parse a `getBlock` result object for `slot`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Parse` if the block hashes are missing.
    pub fn from_json(slot: u64, value: &Value) -> Result<Self, LookupError> {
        let blockhash = value["blockhash"]
            .as_str()
            .ok_or_else(|| LookupError::parse("block missing 'blockhash'"))?
            .to_string();
        let previous_blockhash = value["previousBlockhash"]
            .as_str()
            .ok_or_else(|| LookupError::parse("block missing 'previousBlockhash'"))?
            .to_string();

        let transactions = value["transactions"]
            .as_array()
            .map(|txs| txs.iter().map(BlockTransaction::from_json).collect())
            .unwrap_or_default();

        Ok(Self {
            slot,
            blockhash,
            previous_blockhash,
            parent_slot: value["parentSlot"].as_u64().unwrap_or(0),
            block_height: value["blockHeight"].as_u64(),
            block_time: value["blockTime"].as_i64(),
            rewards_count: value["rewards"].as_array().map_or(0, Vec::len),
            transactions,
        })
    }

    /// Number of transactions in the block.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::JsonMother;

    #[test]
    fn test_block_from_json() {
        let block = BlockInfo::from_json(100, &JsonMother::block(3)).unwrap();
        assert_eq!(block.slot, 100);
        assert_eq!(block.blockhash, "BlockHash1111");
        assert_eq!(block.previous_blockhash, "PrevHash1111");
        assert_eq!(block.parent_slot, 99);
        assert_eq!(block.block_height, Some(90));
        assert_eq!(block.rewards_count, 1);
        assert_eq!(block.transaction_count(), 3);
        assert_eq!(block.transactions[0].signature.as_deref(), Some("sig-0"));
        assert_eq!(block.transactions[0].first_account.as_deref(), Some("account-0"));
    }

    #[test]
    fn test_block_transaction_with_parsed_keys() {
        let tx = serde_json::json!({
            "transaction": {
                "signatures": ["sig"],
                "message": { "accountKeys": [{ "pubkey": "payer" }, { "pubkey": "second" }] }
            }
        });
        let summary = BlockTransaction::from_json(&tx);
        assert_eq!(summary.first_account.as_deref(), Some("second"));
    }

    #[test]
    fn test_block_transaction_single_key_has_no_first_account() {
        let tx = serde_json::json!({
            "transaction": { "signatures": ["sig"], "message": { "accountKeys": ["payer"] } }
        });
        assert!(BlockTransaction::from_json(&tx).first_account.is_none());
    }

    #[test]
    fn test_block_missing_hash_is_parse_error() {
        let value = serde_json::json!({ "parentSlot": 1 });
        assert!(BlockInfo::from_json(2, &value).is_err());
    }
}
