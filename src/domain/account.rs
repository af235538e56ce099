//! Account types for Solana.
//!
//! [`AccountRecord`] is the raw account as returned by `getAccountInfo`,
//! data bytes included. [`AccountInfo`] is the display-facing summary used in
//! lookup results.

use base64::Engine;
use serde_json::Value;

use super::error::LookupError;

// ============================================================================
// Constants
// ============================================================================

/// Program id of the SPL Token program.
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGqPVyBCDgpJrwWpHZpxt6Nd";

/// Size in bytes of an SPL Token mint account.
pub const MINT_ACCOUNT_LEN: usize = 82;

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// ============================================================================
// Account Record
// ============================================================================

/// Raw on-chain account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountRecord {
    /// Balance in lamports.
    pub lamports: u64,
    /// Owning program id.
    pub owner: String,
    /// Decoded account data.
    pub data: Vec<u8>,
    /// Whether the account holds a program.
    pub executable: bool,
    /// Epoch at which rent is next due.
    pub rent_epoch: Option<u64>,
    /// Slot of the RPC context the account was read at.
    pub slot: Option<u64>,
}

impl AccountRecord {
    /// Parse the `value` object of a base64-encoded `getAccountInfo` response.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Parse` if required fields are missing or the
    /// data cannot be decoded.
    pub fn from_json(value: &Value, slot: Option<u64>) -> Result<Self, LookupError> {
        let lamports = value["lamports"]
            .as_u64()
            .ok_or_else(|| LookupError::parse("account missing 'lamports'"))?;
        let owner = value["owner"]
            .as_str()
            .ok_or_else(|| LookupError::parse("account missing 'owner'"))?
            .to_string();

        // `data` is `[payload, encoding]` for base64 responses.
        let data = match &value["data"] {
            Value::Array(parts) => {
                let encoded = parts.first().and_then(Value::as_str).unwrap_or_default();
                base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| LookupError::parse(format!("invalid account data: {e}")))?
            }
            Value::String(encoded) => base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| LookupError::parse(format!("invalid account data: {e}")))?,
            _ => Vec::new(),
        };

        Ok(Self {
            lamports,
            owner,
            data,
            executable: value["executable"].as_bool().unwrap_or(false),
            rent_epoch: value["rentEpoch"].as_u64(),
            slot,
        })
    }

    /// Returns `true` if the SPL Token program owns this account.
    #[must_use]
    pub fn is_token_program_owned(&self) -> bool {
        self.owner == TOKEN_PROGRAM_ID
    }
}

// ============================================================================
// Account Info
// ============================================================================

/// Account metadata for lookup results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountInfo {
    /// The queried address.
    pub address: String,
    /// Balance in lamports.
    pub lamports: u64,
    /// Owning program id.
    pub owner: String,
    /// Length of the raw account data in bytes.
    pub data_len: usize,
    /// Whether the account holds a program.
    pub executable: bool,
    /// Epoch at which rent is next due.
    pub rent_epoch: Option<u64>,
    /// Slot of the RPC context the account was read at.
    pub slot: Option<u64>,
}

impl AccountInfo {
    /// Summarise a raw record under the address it was queried by.
    #[must_use]
    pub fn from_record(address: impl Into<String>, record: &AccountRecord) -> Self {
        Self {
            address: address.into(),
            lamports: record.lamports,
            owner: record.owner.clone(),
            data_len: record.data.len(),
            executable: record.executable,
            rent_epoch: record.rent_epoch,
            slot: record.slot,
        }
    }

    /// Returns the balance in SOL.
    #[must_use]
    pub fn balance_in_sol(&self) -> f64 {
        self.lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_json() {
        let value = json!({
            "data": ["AQID", "base64"],
            "executable": false,
            "lamports": 1_500_000_000u64,
            "owner": "11111111111111111111111111111111",
            "rentEpoch": 18_446_744_073_709_551_615u64,
            "space": 3
        });

        let record = AccountRecord::from_json(&value, Some(42)).unwrap();
        assert_eq!(record.lamports, 1_500_000_000);
        assert_eq!(record.data, vec![1, 2, 3]);
        assert_eq!(record.rent_epoch, Some(u64::MAX));
        assert_eq!(record.slot, Some(42));
        assert!(!record.is_token_program_owned());
    }

    #[test]
    fn test_record_missing_owner_is_parse_error() {
        let value = json!({ "lamports": 1, "data": ["", "base64"] });
        let err = AccountRecord::from_json(&value, None).unwrap_err();
        assert!(matches!(err, LookupError::Parse { .. }));
    }

    #[test]
    fn test_record_rejects_bad_base64() {
        let value = json!({ "lamports": 1, "owner": "x", "data": ["!!!", "base64"] });
        assert!(AccountRecord::from_json(&value, None).is_err());
    }

    #[test]
    fn test_info_from_record() {
        let record = AccountRecord {
            lamports: 2 * LAMPORTS_PER_SOL,
            owner: TOKEN_PROGRAM_ID.to_string(),
            data: vec![0; 165],
            executable: false,
            rent_epoch: Some(361),
            slot: Some(7),
        };
        assert!(record.is_token_program_owned());

        let info = AccountInfo::from_record("ADDR", &record);
        assert_eq!(info.address, "ADDR");
        assert_eq!(info.data_len, 165);
        assert!((info.balance_in_sol() - 2.0).abs() < f64::EPSILON);
    }
}
