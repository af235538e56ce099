//! The persisted network selection.

use crate::domain::Network;

use super::storage::{KeyValueStore, StorageError};

/// Storage key of the last selected network.
pub const LAST_NETWORK_KEY: &str = "solana-last-network";

/// Current network, persisted whenever it changes.
#[derive(Debug)]
pub struct NetworkSelector<S> {
    store: S,
    current: Network,
}

impl<S: KeyValueStore> NetworkSelector<S> {
    /// Load the last selected network, defaulting to mainnet when nothing
    /// usable is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let current = match store.get(LAST_NETWORK_KEY)? {
            Some(raw) => raw.parse::<Network>().unwrap_or_else(|e| {
                tracing::warn!("ignoring stored network: {e}");
                Network::default()
            }),
            None => Network::default(),
        };
        Ok(Self { store, current })
    }

    #[must_use]
    pub const fn current(&self) -> Network {
        self.current
    }

    /// Switch to `network`. Returns `true` if the selection changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the new selection cannot be persisted.
    pub fn select(&mut self, network: Network) -> Result<bool, StorageError> {
        if network == self.current {
            return Ok(false);
        }
        self.store.set(LAST_NETWORK_KEY, network.as_str())?;
        tracing::debug!(%network, "network selected");
        self.current = network;
        Ok(true)
    }
}
