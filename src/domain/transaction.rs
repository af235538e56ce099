//! Transaction types for Solana.
//!
//! Built from a `getTransaction` response requested with the `jsonParsed`
//! encoding, where an instruction is either partially decoded (program id,
//! account list, base-58 data) or fully parsed by the node.

use serde_json::Value;

use super::error::LookupError;

// ============================================================================
// Instruction Summary
// ============================================================================

/// One top-level instruction of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstructionSummary {
    /// Invoked program id.
    pub program_id: Option<String>,
    /// Number of accounts passed to the instruction.
    pub account_count: usize,
    /// Raw instruction data, or the node's decoded form as compact JSON.
    pub data: Option<String>,
}

impl InstructionSummary {
    /// Parse a single entry of `transaction.message.instructions`.
    #[must_use]
    pub fn from_json(ix: &Value) -> Self {
        let data = ix["data"]
            .as_str()
            .map(String::from)
            .or_else(|| match &ix["parsed"] {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                parsed => serde_json::to_string(parsed).ok(),
            });

        Self {
            program_id: ix["programId"].as_str().map(String::from),
            account_count: ix["accounts"].as_array().map_or(0, Vec::len),
            data,
        }
    }
}

// ============================================================================
// Transaction Info
// ============================================================================

/// A confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionInfo {
    /// First signature, which identifies the transaction.
    pub signature: String,
    /// Slot the transaction landed in.
    pub slot: Option<u64>,
    /// Block time in seconds since the epoch.
    pub block_time: Option<i64>,
    /// Fee paid, in lamports.
    pub fee: u64,
    /// `false` when the transaction metadata carries an error.
    pub success: bool,
    /// Blockhash the transaction was signed against.
    pub recent_blockhash: Option<String>,
    /// Top-level instructions in message order.
    pub instructions: Vec<InstructionSummary>,
}

impl TransactionInfo {
    /// Parse a `getTransaction` result object.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Parse` if the signature list or the metadata
    /// object is missing.
    pub fn from_json(value: &Value) -> Result<Self, LookupError> {
        let signature = value["transaction"]["signatures"][0]
            .as_str()
            .ok_or_else(|| LookupError::parse("transaction missing signatures"))?
            .to_string();

        let meta = value
            .get("meta")
            .filter(|m| !m.is_null())
            .ok_or_else(|| LookupError::parse("transaction missing 'meta'"))?;

        let message = &value["transaction"]["message"];
        let instructions = message["instructions"]
            .as_array()
            .map(|ixs| ixs.iter().map(InstructionSummary::from_json).collect())
            .unwrap_or_default();

        Ok(Self {
            signature,
            slot: value["slot"].as_u64(),
            block_time: value["blockTime"].as_i64(),
            fee: meta["fee"].as_u64().unwrap_or(0),
            success: meta["err"].is_null(),
            recent_blockhash: message["recentBlockhash"].as_str().map(String::from),
            instructions,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
