//! Error types for Solana lookup operations.
//!
//! This module defines the error taxonomy used by the classifier, the
//! resolver and the outbound clients. The taxonomy is kept internally;
//! interactive surfaces show a single generic message instead.

use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// The only failure text shown to users, whatever the underlying cause.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to fetch Solana data. Please check your input and try again.";

// ============================================================================
// Error Types
// ============================================================================

/// Custom error type for lookup operations.
///
/// This enum provides specific error variants for the different failure
/// modes encountered when resolving a query against a Solana cluster.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network-related errors from HTTP requests.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The RPC node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },

    /// JSON parsing or data structure errors.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// Entity not found on the queried cluster.
    #[error("{entity} not found")]
    NotFound {
        /// The kind of entity that was not found (e.g., "Account", "Block").
        entity: &'static str,
    },

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LookupError {
    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new not found error.
    ///
    /// # Arguments
    ///
    /// * `entity` - The type of entity that was not found
    #[must_use]
    pub const fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an RPC error from a JSON-RPC error object.
    #[must_use]
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Returns `true` for the not-found variant.
    #[cfg(test)]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The message shown to users at the action boundary.
    ///
    /// Every variant collapses to the same text; the detailed cause is only
    /// logged.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }

    /// Convert to a `color_eyre::Report` for the binary boundary.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::account("Account", "Account not found")]
    #[case::transaction("Transaction", "Transaction not found")]
    #[case::block("Block", "Block not found")]
    #[case::token("Token account", "Token account not found")]
    fn test_not_found_display(#[case] entity: &'static str, #[case] expected: &str) {
        assert_eq!(LookupError::not_found(entity).to_string(), expected);
    }

    #[test]
    fn test_lookup_error_display() {
        let parse_err = LookupError::parse("test error");
        assert_eq!(format!("{}", parse_err), "Parse error: test error");

        let invalid_err = LookupError::invalid_input("bad input");
        assert_eq!(format!("{}", invalid_err), "Invalid input: bad input");

        let rpc_err = LookupError::rpc(-32602, "Invalid param");
        assert_eq!(format!("{}", rpc_err), "RPC error -32602: Invalid param");
    }

    #[test]
    fn test_user_message_is_generic() {
        let errors = [
            LookupError::invalid_input("empty"),
            LookupError::not_found("Block"),
            LookupError::parse("bad json"),
            LookupError::rpc(-1, "boom"),
        ];
        for err in errors {
            assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_is_not_found() {
        assert!(LookupError::not_found("Account").is_not_found());
        assert!(!LookupError::invalid_input("x").is_not_found());
    }
}
