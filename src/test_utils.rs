//! Shared test utilities and Mother pattern factories.
//!
//! Mothers build domain values and raw RPC JSON with realistic defaults;
//! [`FakeChain`] and [`FakeMetadata`] stand in for the HTTP clients. Use
//! these helpers to avoid copy-pasting setup code across tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};

use crate::client::{ChainRpc, MetadataSource};
use crate::domain::account::TOKEN_PROGRAM_ID;
use crate::domain::block::BlockTransaction;
use crate::domain::transaction::InstructionSummary;
use crate::domain::{
    AccountInfo, AccountRecord, BlockInfo, LookupError, Network, TokenMetadata, TransactionInfo,
};

/// The System Program, owner of plain wallet accounts.
pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct RecordMother;

impl RecordMother {
    #[must_use]
    pub fn owned_by(owner: &str, data_len: usize) -> AccountRecord {
        AccountRecord {
            lamports: 2_039_280,
            owner: owner.to_string(),
            data: vec![0; data_len],
            executable: false,
            rent_epoch: Some(361),
            slot: Some(250_000_000),
        }
    }

    #[must_use]
    pub fn system_with_lamports(lamports: u64) -> AccountRecord {
        AccountRecord {
            lamports,
            ..Self::owned_by(SYSTEM_PROGRAM_ID, 0)
        }
    }

    /// A 165-byte SPL token account whose first 32 bytes are `mint`.
    #[must_use]
    pub fn token_account(mint: [u8; 32]) -> AccountRecord {
        let mut data = mint.to_vec();
        data.resize(165, 0);
        AccountRecord {
            data,
            ..Self::owned_by(TOKEN_PROGRAM_ID, 0)
        }
    }
}

pub struct AccountMother;

impl AccountMother {
    #[must_use]
    pub fn system(address: &str) -> AccountInfo {
        AccountInfo::from_record(address, &RecordMother::system_with_lamports(1_500_000_000))
    }

    #[must_use]
    pub fn token(address: &str) -> AccountInfo {
        AccountInfo::from_record(address, &RecordMother::token_account([7; 32]))
    }
}

pub struct TransactionMother;

impl TransactionMother {
    /// A well-formed 88-character signature.
    pub const SIGNATURE: &'static str =
        "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";

    #[must_use]
    pub fn transfer(signature: &str) -> TransactionInfo {
        TransactionInfo {
            signature: signature.to_string(),
            slot: Some(250_000_000),
            block_time: Some(1_700_000_000),
            fee: 5000,
            success: true,
            recent_blockhash: Some("RecentHash1111".to_string()),
            instructions: vec![InstructionSummary {
                program_id: Some(SYSTEM_PROGRAM_ID.to_string()),
                account_count: 2,
                data: Some("3Bxs4h24hBtQy9rw".to_string()),
            }],
        }
    }
}

pub struct BlockMother;

impl BlockMother {
    #[must_use]
    pub fn with_transactions(slot: u64, count: usize) -> BlockInfo {
        BlockInfo {
            slot,
            blockhash: "BlockHash1111".to_string(),
            previous_blockhash: "PrevHash1111".to_string(),
            parent_slot: slot.saturating_sub(1),
            block_height: Some(slot.saturating_sub(10)),
            block_time: Some(1_700_000_000),
            rewards_count: 1,
            transactions: (0..count)
                .map(|i| BlockTransaction {
                    signature: Some(format!("sig-{i}")),
                    first_account: Some(format!("account-{i}")),
                })
                .collect(),
        }
    }
}

// ============================================================================
// JSON Mother - raw RPC payloads
// ============================================================================

pub struct JsonMother;

impl JsonMother {
    pub const SIGNATURE: &'static str = TransactionMother::SIGNATURE;

    /// A `getTransaction` result (`jsonParsed`) with one raw and one parsed
    /// instruction.
    #[must_use]
    pub fn transaction() -> Value {
        json!({
            "slot": 250_000_000u64,
            "blockTime": 1_700_000_000i64,
            "meta": {
                "err": null,
                "fee": 5000,
                "preBalances": [1_000_000_000u64, 0],
                "postBalances": [999_995_000u64, 0]
            },
            "transaction": {
                "signatures": [Self::SIGNATURE],
                "message": {
                    "recentBlockhash": "RecentHash1111",
                    "accountKeys": [
                        { "pubkey": "Payer1111", "signer": true, "writable": true },
                        { "pubkey": "Receiver1111", "signer": false, "writable": true }
                    ],
                    "instructions": [
                        {
                            "programId": "ComputeBudget111111111111111111111111111111",
                            "accounts": [],
                            "data": "3DdGGhkhJbjm"
                        },
                        {
                            "program": "system",
                            "programId": SYSTEM_PROGRAM_ID,
                            "parsed": {
                                "type": "transfer",
                                "info": {
                                    "source": "Payer1111",
                                    "destination": "Receiver1111",
                                    "lamports": 1000
                                }
                            }
                        }
                    ]
                }
            }
        })
    }

    /// A `getBlock` result (`json` encoding) with `count` transactions.
    #[must_use]
    pub fn block(count: usize) -> Value {
        let transactions: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "meta": { "err": null, "fee": 5000 },
                    "transaction": {
                        "signatures": [format!("sig-{i}")],
                        "message": {
                            "accountKeys": [format!("payer-{i}"), format!("account-{i}")]
                        }
                    }
                })
            })
            .collect();

        json!({
            "blockhash": "BlockHash1111",
            "previousBlockhash": "PrevHash1111",
            "parentSlot": 99,
            "blockHeight": 90,
            "blockTime": 1_700_000_000i64,
            "rewards": [
                { "pubkey": "Validator1111", "lamports": 5000, "rewardType": "Fee" }
            ],
            "transactions": transactions
        })
    }

    /// A base64 `getAccountInfo` value.
    #[must_use]
    pub fn account(owner: &str, data_base64: &str) -> Value {
        json!({
            "lamports": 1_500_000_000u64,
            "owner": owner,
            "data": [data_base64, "base64"],
            "executable": false,
            "rentEpoch": 361
        })
    }
}

// ============================================================================
// Fakes
// ============================================================================

fn fake_failure() -> LookupError {
    LookupError::rpc(-32000, "simulated transport failure")
}

/// In-memory [`ChainRpc`]. Clones share the call counter.
#[derive(Debug, Clone, Default)]
pub struct FakeChain {
    accounts: HashMap<(Network, String), AccountRecord>,
    transactions: HashMap<(Network, String), TransactionInfo>,
    blocks: HashMap<(Network, u64), BlockInfo>,
    block_delays: HashMap<u64, Duration>,
    failing: bool,
    calls: Arc<AtomicUsize>,
}

impl FakeChain {
    #[must_use]
    pub fn with_account(mut self, network: Network, address: &str, record: AccountRecord) -> Self {
        self.accounts.insert((network, address.to_string()), record);
        self
    }

    #[must_use]
    pub fn with_transaction(
        mut self,
        network: Network,
        signature: &str,
        txn: TransactionInfo,
    ) -> Self {
        self.transactions
            .insert((network, signature.to_string()), txn);
        self
    }

    #[must_use]
    pub fn with_block(mut self, network: Network, block: BlockInfo) -> Self {
        self.blocks.insert((network, block.slot), block);
        self
    }

    /// `getBlock` for `slot` answers only after `delay`.
    #[must_use]
    pub fn with_block_delay(mut self, slot: u64, delay: Duration) -> Self {
        self.block_delays.insert(slot, delay);
        self
    }

    /// Every call fails with an RPC error.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of RPC calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> Result<(), LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(fake_failure());
        }
        Ok(())
    }
}

impl ChainRpc for FakeChain {
    async fn get_account_info(
        &self,
        network: Network,
        address: &str,
    ) -> Result<Option<AccountRecord>, LookupError> {
        self.begin_call()?;
        Ok(self.accounts.get(&(network, address.to_string())).cloned())
    }

    async fn get_transaction(
        &self,
        network: Network,
        signature: &str,
    ) -> Result<Option<TransactionInfo>, LookupError> {
        self.begin_call()?;
        Ok(self
            .transactions
            .get(&(network, signature.to_string()))
            .cloned())
    }

    async fn get_block(
        &self,
        network: Network,
        slot: u64,
    ) -> Result<Option<BlockInfo>, LookupError> {
        self.begin_call()?;
        if let Some(delay) = self.block_delays.get(&slot) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.blocks.get(&(network, slot)).cloned())
    }
}

/// In-memory [`MetadataSource`] keyed by mint.
#[derive(Debug, Clone, Default)]
pub struct FakeMetadata {
    tokens: HashMap<String, TokenMetadata>,
    failing: bool,
}

impl FakeMetadata {
    #[must_use]
    pub fn with_metadata(mut self, mint: &str, metadata: TokenMetadata) -> Self {
        self.tokens.insert(mint.to_string(), metadata);
        self
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl MetadataSource for FakeMetadata {
    async fn token_metadata(
        &self,
        _network: Network,
        address: &str,
    ) -> Result<Option<TokenMetadata>, LookupError> {
        if self.failing {
            return Err(fake_failure());
        }
        Ok(self.tokens.get(address).cloned())
    }
}
