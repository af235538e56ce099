//! Shared HTTP client construction for RPC and metadata requests.

use reqwest::Client;
use std::time::Duration;

use crate::domain::LookupError;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Create config with custom timeout
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build the HTTP client with connection pooling.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Network` if the client fails to initialize
    /// (e.g., TLS backend unavailable).
    pub fn build_client(&self) -> Result<Client, LookupError> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(self.timeout)
            .user_agent(concat!("solprobe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        assert_eq!(
            HttpConfig::default().timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_custom_timeout_builds() {
        let config = HttpConfig::with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.build_client().is_ok());
    }
}
