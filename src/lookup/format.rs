//! Markdown rendering of lookup results.
//!
//! [`format_result`] is total: absent optional fields render as `Unknown`
//! and never fail the rendering.

use chrono::TimeZone;

use crate::domain::{
    AccountInfo, BlockInfo, LAMPORTS_PER_SOL, ResultPayload, SearchResult, TokenAccountInfo,
    TransactionInfo,
};

// ============================================================================
// Constants
// ============================================================================

/// Placeholder for absent values.
pub const UNKNOWN: &str = "Unknown";

/// Number of block transactions listed before the remainder is summarised.
pub const BLOCK_TXN_PREVIEW: usize = 5;

// ============================================================================
// Value Formatting
// ============================================================================

/// Format a fee in lamports as SOL with 9 decimal places, without the unit.
#[must_use]
pub fn format_fee(lamports: u64) -> String {
    format!("{:.9}", lamports as f64 / LAMPORTS_PER_SOL as f64)
}

/// Format a byte length in KB with 2 decimal places, without the unit.
#[must_use]
pub fn format_kb(bytes: usize) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}

/// Format a number with commas for thousands separators.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_with_commas(1000), "1,000");
/// assert_eq!(format_with_commas(1_000_000), "1,000,000");
/// ```
#[must_use]
pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a unix timestamp (seconds) as local date/time.
#[must_use]
pub fn format_block_time(timestamp_secs: Option<i64>) -> String {
    timestamp_secs
        .and_then(|secs| chrono::Local.timestamp_opt(secs, 0).single())
        .map_or_else(
            || UNKNOWN.to_string(),
            |dt| dt.format("%a, %d %b %Y %H:%M:%S").to_string(),
        )
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

// ============================================================================
// Result Formatting
// ============================================================================

/// Render a result as markdown.
#[must_use]
pub fn format_result(result: &SearchResult) -> String {
    match &result.payload {
        ResultPayload::Address(account) => format_account(account),
        ResultPayload::Transaction(txn) => format_transaction(txn),
        ResultPayload::Block(block) => format_block(block),
        ResultPayload::Token(token) => format_token(token),
    }
}

fn format_account(account: &AccountInfo) -> String {
    [
        "# Account Details".to_string(),
        String::new(),
        "## Overview".to_string(),
        format!("- **Address:** `{}`", account.address),
        format!("- **SOL Balance:** {:.4} SOL", account.balance_in_sol()),
        format!("- **Lamports:** {}", format_with_commas(account.lamports)),
        format!("- **Executable:** {}", yes_no(account.executable)),
        format!("- **Data Size:** {} KB", format_kb(account.data_len)),
        String::new(),
        "## Metadata".to_string(),
        format!("- **Owner Program:** `{}`", account.owner),
        format!("- **Rent Epoch:** {}", or_unknown(account.rent_epoch)),
        format!("- **Slot:** {}", or_unknown(account.slot)),
    ]
    .join("\n")
}

fn format_transaction(txn: &TransactionInfo) -> String {
    let mut lines = vec![
        "# Transaction Details".to_string(),
        String::new(),
        "## Overview".to_string(),
        format!("- **Signature:** `{}`", txn.signature),
        format!("- **Block Time:** {}", format_block_time(txn.block_time)),
        format!(
            "- **Fee:** {} SOL ({} lamports)",
            format_fee(txn.fee),
            format_with_commas(txn.fee)
        ),
        format!(
            "- **Status:** {}",
            if txn.success { "Success" } else { "Failed" }
        ),
        String::new(),
        "## Transaction Info".to_string(),
        format!("- **Slot:** {}", or_unknown(txn.slot)),
        format!(
            "- **Recent Block Hash:** `{}`",
            or_unknown(txn.recent_blockhash.as_deref())
        ),
        String::new(),
        "## Instructions".to_string(),
    ];

    if txn.instructions.is_empty() {
        lines.push("No instructions".to_string());
    }

    for (index, ix) in txn.instructions.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("### Instruction {}", index + 1));
        lines.push(format!(
            "- **Program:** `{}`",
            or_unknown(ix.program_id.as_deref())
        ));
        lines.push(format!("- **Accounts:** {}", ix.account_count));
        lines.push(format!(
            "- **Data:** `{}`",
            ix.data.as_deref().unwrap_or("No data")
        ));
    }

    lines.join("\n")
}

fn format_block(block: &BlockInfo) -> String {
    let mut lines = vec![
        "# Block Information".to_string(),
        String::new(),
        "## Overview".to_string(),
        format!("- **Slot:** {}", block.slot),
        format!("- **Block Height:** {}", or_unknown(block.block_height)),
        format!("- **Block Hash:** `{}`", block.blockhash),
        format!("- **Previous Block Hash:** `{}`", block.previous_blockhash),
        format!("- **Transaction Count:** {}", block.transaction_count()),
        format!("- **Block Time:** {}", format_block_time(block.block_time)),
        String::new(),
        "## Block Details".to_string(),
        format!("- **Parent Slot:** {}", block.parent_slot),
        format!("- **Rewards:** {}", block.rewards_count),
        format!("- **Block Time:** {}", or_unknown(block.block_time)),
        format!("- **Block Height:** {}", or_unknown(block.block_height)),
        String::new(),
        "## Transactions".to_string(),
    ];

    if block.transactions.is_empty() {
        lines.push("No transactions".to_string());
    }

    let preview = block.transactions.iter().take(BLOCK_TXN_PREVIEW);
    for (index, tx) in preview.enumerate() {
        lines.push(String::new());
        lines.push(format!("### Transaction {}", index + 1));
        lines.push(format!(
            "- **Signature:** `{}`",
            or_unknown(tx.signature.as_deref())
        ));
        lines.push(format!(
            "- **First Account:** `{}`",
            or_unknown(tx.first_account.as_deref())
        ));
    }

    let remaining = block.transaction_count().saturating_sub(BLOCK_TXN_PREVIEW);
    if remaining > 0 {
        lines.push(String::new());
        lines.push(format!("... and {remaining} more transactions"));
    }

    lines.join("\n")
}

fn format_token(token: &TokenAccountInfo) -> String {
    let metadata = token.metadata.as_ref();
    let account = &token.account;

    let mut lines = vec![
        "# Token Account Information".to_string(),
        String::new(),
        "## Token Details".to_string(),
    ];

    if let Some(logo) = metadata.and_then(|m| m.logo_uri.as_deref()) {
        lines.push(format!(
            "<img src=\"{logo}\" width=\"48\" height=\"48\" style=\"border-radius: 8px;\" />"
        ));
    }

    lines.extend([
        String::new(),
        "### Basic Information".to_string(),
        format!("- **Name:** {}", or_unknown(metadata.map(|m| m.name.as_str()))),
        format!(
            "- **Symbol:** {}",
            or_unknown(metadata.map(|m| m.symbol.as_str()))
        ),
        format!("- **Decimals:** {}", or_unknown(metadata.map(|m| m.decimals))),
    ]);

    if let Some(website) = metadata.and_then(|m| m.website.as_deref()) {
        lines.push(format!("- **Website:** {website}"));
    }

    let fdv = metadata
        .and_then(|m| m.fully_diluted_value.as_deref())
        .map(|v| format!("${v}"));
    let supply = metadata.and_then(|m| m.total_supply_formatted.as_deref());

    lines.extend([
        String::new(),
        "### Market Data".to_string(),
        format!("- **Fully Diluted Value:** {}", or_unknown(fdv)),
        format!("- **Total Supply:** {}", or_unknown(supply)),
        String::new(),
        "## Account Information".to_string(),
        "### Overview".to_string(),
        format!("- **Token Account:** `{}`", account.address),
        format!("- **Mint Address:** `{}`", or_unknown(token.mint.as_deref())),
        format!("- **Owner Program:** `{}`", account.owner),
        format!("- **Lamports:** {}", format_with_commas(account.lamports)),
        format!("- **Data Size:** {} KB", format_kb(account.data_len)),
        String::new(),
        "### Account Details".to_string(),
        format!("- **Rent Epoch:** {}", or_unknown(account.rent_epoch)),
        format!("- **Executable:** {}", yes_no(account.executable)),
    ]);

    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================
