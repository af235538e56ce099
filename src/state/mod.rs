//! State that outlives a single lookup.
//!
//! - [`KeyValueStore`] - the persistence seam, with [`JsonFileStore`] on
//!   disk and `MemoryStore` for tests
//! - [`HistoryStore`] - recent searches, newest first
//! - [`NetworkSelector`] - the last selected cluster
//! - [`SearchSession`] - generation counter for overlapping searches
//! - [`AppConfig`] - user configuration
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use crate::state::{HistoryStore, JsonFileStore, NetworkSelector};
//!
//! let store = Arc::new(JsonFileStore::open_default()?);
//! let history = HistoryStore::new(Arc::clone(&store));
//! let network = NetworkSelector::load(store)?;
//! ```

pub mod config;
pub mod history;
pub mod network;
pub mod platform;
pub mod session;
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use history::HistoryStore;
pub use network::NetworkSelector;
pub use session::{SearchSession, SearchTicket};
pub use storage::{JsonFileStore, KeyValueStore, StorageError};
