//! Token account and token metadata types.

use serde_json::Value;

use super::account::{AccountInfo, AccountRecord, MINT_ACCOUNT_LEN};

// ============================================================================
// Token Metadata
// ============================================================================

/// Descriptive token data from the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenMetadata {
    /// Token name, `"Unknown Token"` when the service omits it.
    pub name: String,
    /// Ticker symbol, `"UNKNOWN"` when the service omits it.
    pub symbol: String,
    /// Decimal places, `0` when the service omits it.
    pub decimals: u8,
    /// Logo image URL.
    pub logo_uri: Option<String>,
    /// Project website.
    pub website: Option<String>,
    /// Human-formatted total supply.
    pub total_supply_formatted: Option<String>,
    /// Fully diluted valuation in USD.
    pub fully_diluted_value: Option<String>,
}

impl TokenMetadata {
    /// Parse a metadata service response, filling defaults for missing fields.
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        let text = |key: &str| {
            json[key]
                .as_str()
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        // The service reports decimals either as a number or a numeric string.
        let decimals = json["decimals"]
            .as_u64()
            .or_else(|| json["decimals"].as_str().and_then(|s| s.parse().ok()))
            .and_then(|d| u8::try_from(d).ok())
            .unwrap_or(0);

        Self {
            name: text("name").unwrap_or_else(|| "Unknown Token".to_string()),
            symbol: text("symbol").unwrap_or_else(|| "UNKNOWN".to_string()),
            decimals,
            logo_uri: text("logo"),
            website: text("website"),
            total_supply_formatted: text("totalSupplyFormatted"),
            fully_diluted_value: text("fullyDilutedValue"),
        }
    }
}

// ============================================================================
// Token Account Info
// ============================================================================

/// A Token-program account with its mint and optional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenAccountInfo {
    /// Account fields, as for a plain address.
    pub account: AccountInfo,
    /// Mint the account belongs to.
    pub mint: Option<String>,
    /// Metadata, `None` when the service could not be reached.
    pub metadata: Option<TokenMetadata>,
}

/// Determine the mint for a Token-program account.
///
/// A token account stores its mint in the first 32 bytes. A mint account is
/// its own mint.
#[must_use]
pub fn mint_address(address: &str, record: &AccountRecord) -> Option<String> {
    if record.data.len() == MINT_ACCOUNT_LEN {
        return Some(address.to_string());
    }
    record
        .data
        .get(..32)
        .map(|bytes| bs58::encode(bytes).into_string())
}

// ============================================================================
// Tests
// ============================================================================
