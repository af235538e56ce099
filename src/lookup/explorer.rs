//! Block explorer links.

use crate::domain::{Explorer, Network, SearchKind};

/// Returns the path segment an explorer uses for `kind`.
#[must_use]
pub const fn path_segment(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::Address => "account",
        SearchKind::Transaction => "tx",
        SearchKind::Block => "block",
        SearchKind::Token => "token",
    }
}

/// Build the browser URL for `query` on `explorer`, selecting `network`.
///
/// Pure and total. The cluster suffix always follows the path and is the
/// only query string in the URL.
#[must_use]
pub fn explorer_url(kind: SearchKind, query: &str, network: Network, explorer: Explorer) -> String {
    format!(
        "{}/{}/{}{}",
        explorer.base_url(),
        path_segment(kind),
        query.trim(),
        explorer.cluster_suffix(network)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        SearchKind::Address,
        Network::Mainnet,
        Explorer::SolanaExplorer,
        "https://explorer.solana.com/account/ABC123"
    )]
    #[case(
        SearchKind::Address,
        Network::Devnet,
        Explorer::SolanaFm,
        "https://solana.fm/account/ABC123?cluster=devnet-solana"
    )]
    #[case(
        SearchKind::Transaction,
        Network::Testnet,
        Explorer::Solscan,
        "https://solscan.io/tx/ABC123?cluster=testnet"
    )]
    #[case(
        SearchKind::Block,
        Network::Devnet,
        Explorer::SolanaExplorer,
        "https://explorer.solana.com/block/ABC123?cluster=devnet"
    )]
    #[case(
        SearchKind::Token,
        Network::Testnet,
        Explorer::SolanaFm,
        "https://solana.fm/token/ABC123?cluster=testnet-solana"
    )]
    #[case(
        SearchKind::Token,
        Network::Mainnet,
        Explorer::Solscan,
        "https://solscan.io/token/ABC123"
    )]
    fn test_explorer_url(
        #[case] kind: SearchKind,
        #[case] network: Network,
        #[case] explorer: Explorer,
        #[case] expected: &str,
    ) {
        assert_eq!(explorer_url(kind, "ABC123", network, explorer), expected);
    }

    #[test]
    fn test_suffix_never_doubles_query_string() {
        for explorer in [Explorer::SolanaExplorer, Explorer::Solscan, Explorer::SolanaFm] {
            for network in Network::ALL {
                let url = explorer_url(SearchKind::Block, "42", network, explorer);
                assert!(url.matches('?').count() <= 1, "{url}");
            }
        }
    }
}
