//! Query classification.
//!
//! Maps a raw query to a [`SearchKind`]. Signatures and slot numbers are
//! recognised lexically; an address-shaped query is probed on-chain to tell
//! Token-program accounts from plain addresses.

use std::ops::RangeInclusive;

use crate::client::ChainRpc;
use crate::domain::{Network, SearchKind};

// ============================================================================
// Constants
// ============================================================================

/// Length of a base-58 encoded transaction signature.
pub const SIGNATURE_LEN: usize = 88;

/// Lengths a base-58 encoded public key can take.
pub const ADDRESS_LEN: RangeInclusive<usize> = 32..=44;

// ============================================================================
// Lexical Rules
// ============================================================================

/// Returns `true` for characters of the Bitcoin base-58 alphabet
/// (no `0`, `I`, `O` or `l`).
#[must_use]
pub const fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Returns `true` if `s` is non-empty and entirely base-58.
#[must_use]
pub fn is_base58(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_base58_char)
}

/// Outcome of the purely lexical classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalClass {
    /// The kind is settled without touching the network.
    Settled(SearchKind),
    /// Address-shaped; ownership decides between address and token.
    NeedsProbe,
}

/// Apply the lexical rules in order; the first match wins.
#[must_use]
pub fn lexical_kind(query: &str) -> LexicalClass {
    let query = query.trim();

    if query.is_empty() {
        return LexicalClass::Settled(SearchKind::Address);
    }

    if query.len() == SIGNATURE_LEN && is_base58(query) {
        return LexicalClass::Settled(SearchKind::Transaction);
    }

    if query.chars().all(|c| c.is_ascii_digit()) {
        return LexicalClass::Settled(SearchKind::Block);
    }

    if ADDRESS_LEN.contains(&query.len()) && is_base58(query) {
        return LexicalClass::NeedsProbe;
    }

    LexicalClass::Settled(SearchKind::Address)
}

// ============================================================================
// Classification
// ============================================================================

/// Classify `query` against `network`.
///
/// The probe fails open: a missing account or any client error classifies
/// as [`SearchKind::Address`]. Because the probe reads live state, the same
/// query can classify differently over time.
pub async fn classify<C: ChainRpc>(chain: &C, query: &str, network: Network) -> SearchKind {
    let query = query.trim();
    match lexical_kind(query) {
        LexicalClass::Settled(kind) => kind,
        LexicalClass::NeedsProbe => match chain.get_account_info(network, query).await {
            Ok(Some(account)) if account.is_token_program_owned() => SearchKind::Token,
            Ok(_) => SearchKind::Address,
            Err(e) => {
                tracing::debug!("token probe for {query} failed, assuming address: {e}");
                SearchKind::Address
            }
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::TOKEN_PROGRAM_ID;
    use crate::test_utils::{FakeChain, RecordMother};
    use rstest::rstest;

    const ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   \t")]
    #[case::garbage("hello world!")]
    #[case::too_short("abc")]
    #[case::excluded_letters("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl")]
    #[case::too_long_for_address(
        "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9z"
    )]
    fn test_lexical_defaults_to_address(#[case] query: &str) {
        assert_eq!(
            lexical_kind(query),
            LexicalClass::Settled(SearchKind::Address)
        );
    }

    #[test]
    fn test_88_char_base58_is_transaction() {
        let sig = "5".repeat(SIGNATURE_LEN);
        assert_eq!(
            lexical_kind(&sig),
            LexicalClass::Settled(SearchKind::Transaction)
        );

        let mixed: String = "Ab3".chars().cycle().take(SIGNATURE_LEN).collect();
        assert_eq!(
            lexical_kind(&mixed),
            LexicalClass::Settled(SearchKind::Transaction)
        );
    }

    #[test]
    fn test_88_chars_with_invalid_letter_is_not_transaction() {
        let mut sig = "5".repeat(SIGNATURE_LEN - 1);
        sig.push('0');
        // All digits, so the slot rule takes it.
        assert_eq!(lexical_kind(&sig), LexicalClass::Settled(SearchKind::Block));

        let mut sig = "a".repeat(SIGNATURE_LEN - 1);
        sig.push('l');
        assert_eq!(lexical_kind(&sig), LexicalClass::Settled(SearchKind::Address));
    }

    #[rstest]
    #[case("0")]
    #[case("12345")]
    #[case("250000000")]
    // Digit-only strings in the address length range are still slots.
    #[case("12345678901234567890123456789012")]
    fn test_digits_are_block(#[case] query: &str) {
        assert_eq!(lexical_kind(query), LexicalClass::Settled(SearchKind::Block));
    }

    #[test]
    fn test_address_shape_needs_probe() {
        assert_eq!(lexical_kind(ADDRESS), LexicalClass::NeedsProbe);
        assert_eq!(lexical_kind(&"a".repeat(32)), LexicalClass::NeedsProbe);
        assert_eq!(lexical_kind(&"a".repeat(31)), LexicalClass::Settled(SearchKind::Address));
    }

    #[test]
    fn test_base58_alphabet() {
        for c in ['0', 'I', 'O', 'l', ' ', '+', '/'] {
            assert!(!is_base58_char(c), "{c} must be excluded");
        }
        for c in ['1', '9', 'A', 'H', 'J', 'N', 'P', 'Z', 'a', 'k', 'm', 'z'] {
            assert!(is_base58_char(c), "{c} must be included");
        }
        assert!(!is_base58(""));
    }

    #[tokio::test]
    async fn test_token_owned_account_is_token() {
        let chain = FakeChain::default().with_account(
            Network::Mainnet,
            ADDRESS,
            RecordMother::owned_by(TOKEN_PROGRAM_ID, 165),
        );
        assert_eq!(
            classify(&chain, ADDRESS, Network::Mainnet).await,
            SearchKind::Token
        );
    }

    #[tokio::test]
    async fn test_other_owner_is_address() {
        let chain = FakeChain::default().with_account(
            Network::Mainnet,
            ADDRESS,
            RecordMother::owned_by("11111111111111111111111111111111", 0),
        );
        assert_eq!(
            classify(&chain, ADDRESS, Network::Mainnet).await,
            SearchKind::Address
        );
    }

    #[tokio::test]
    async fn test_missing_account_is_address() {
        let chain = FakeChain::default();
        assert_eq!(
            classify(&chain, ADDRESS, Network::Mainnet).await,
            SearchKind::Address
        );
    }

    #[tokio::test]
    async fn test_probe_error_is_address() {
        let chain = FakeChain::default().failing();
        assert_eq!(
            classify(&chain, ADDRESS, Network::Mainnet).await,
            SearchKind::Address
        );
    }

    #[tokio::test]
    async fn test_probe_uses_requested_network() {
        let chain = FakeChain::default().with_account(
            Network::Devnet,
            ADDRESS,
            RecordMother::owned_by(TOKEN_PROGRAM_ID, 165),
        );
        assert_eq!(
            classify(&chain, ADDRESS, Network::Devnet).await,
            SearchKind::Token
        );
        assert_eq!(
            classify(&chain, ADDRESS, Network::Mainnet).await,
            SearchKind::Address
        );
    }

    #[tokio::test]
    async fn test_lexical_kinds_skip_probe() {
        let chain = FakeChain::default().failing();
        let sig = "3".repeat(SIGNATURE_LEN);
        assert_eq!(
            classify(&chain, &sig, Network::Testnet).await,
            SearchKind::Transaction
        );
        assert_eq!(
            classify(&chain, "42", Network::Testnet).await,
            SearchKind::Block
        );
        assert_eq!(chain.call_count(), 0);
    }
}
