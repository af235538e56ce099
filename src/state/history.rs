//! Recent-search history.
//!
//! Entries are kept newest first, unique by query and capped at
//! [`MAX_HISTORY`]. Every operation rewrites the whole collection under
//! [`HISTORY_KEY`].

use crate::domain::{HistoryEntry, SearchKind};

use super::storage::{KeyValueStore, StorageError};

// ============================================================================
// Constants
// ============================================================================

/// Storage key of the serialized history.
pub const HISTORY_KEY: &str = "solana-search-history";

/// Maximum number of entries kept.
pub const MAX_HISTORY: usize = 50;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ============================================================================
// History Store
// ============================================================================

/// History backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> HistoryStore<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_clock(store, now_millis)
    }

    /// Uses `clock` (epoch milliseconds) for new entries.
    #[must_use]
    pub fn with_clock(store: S, clock: fn() -> i64) -> Self {
        Self { store, clock }
    }

    /// Returns all entries, newest first.
    ///
    /// Unreadable stored history is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("ignoring unreadable search history: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Returns the entry for `query`, if recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn get(&self, query: &str) -> Result<Option<HistoryEntry>, StorageError> {
        Ok(self.list()?.into_iter().find(|e| e.query == query))
    }

    /// Record a successful search.
    ///
    /// Any previous entry for the same query is replaced; the new entry goes
    /// to the front and the oldest entries beyond [`MAX_HISTORY`] are dropped.
    /// Timestamps stay strictly descending even within one millisecond.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn record(&self, query: &str, kind: SearchKind) -> Result<HistoryEntry, StorageError> {
        let mut entries = self.list()?;
        entries.retain(|e| e.query != query);

        let now = (self.clock)();
        let timestamp = entries
            .first()
            .map_or(now, |newest| now.max(newest.timestamp.saturating_add(1)));

        let entry = HistoryEntry::new(query, kind, timestamp);
        entries.insert(0, entry.clone());
        entries.truncate(MAX_HISTORY);

        self.save(&entries)?;
        tracing::debug!(query, %kind, "recorded search");
        Ok(entry)
    }

    /// Remove the entry for `query`. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn remove(&self, query: &str) -> Result<bool, StorageError> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|e| e.query != query);

        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, &raw)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::MemoryStore;

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    fn history() -> HistoryStore<MemoryStore> {
        HistoryStore::with_clock(MemoryStore::new(), fixed_clock)
    }

    #[test]
    fn test_empty_history() {
        let history = history();
        assert!(history.list().unwrap().is_empty());
        assert!(history.get("x").unwrap().is_none());
    }

    #[test]
    fn test_record_inserts_newest_first() {
        let history = history();
        history.record("a", SearchKind::Address).unwrap();
        history.record("b", SearchKind::Block).unwrap();

        let entries = history.list().unwrap();
        assert_eq!(entries[0].query, "b");
        assert_eq!(entries[1].query, "a");
    }

    #[test]
    fn test_record_same_query_keeps_one_entry_at_front() {
        let history = history();
        history.record("a", SearchKind::Address).unwrap();
        history.record("b", SearchKind::Address).unwrap();
        let second = history.record("a", SearchKind::Token).unwrap();

        let entries = history.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], second);
        assert_eq!(entries[0].kind, SearchKind::Token);
        assert_eq!(entries.iter().filter(|e| e.query == "a").count(), 1);
    }

    #[test]
    fn test_timestamps_strictly_descending_with_frozen_clock() {
        let history = history();
        for i in 0..5 {
            history.record(&format!("q{i}"), SearchKind::Block).unwrap();
        }

        let entries = history.list().unwrap();
        assert!(entries.is_sorted_by(|a, b| a.timestamp > b.timestamp));
        assert_eq!(entries.last().unwrap().timestamp, fixed_clock());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let history = history();
        for i in 0..=MAX_HISTORY {
            history.record(&format!("q{i}"), SearchKind::Block).unwrap();
        }

        let entries = history.list().unwrap();
        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].query, format!("q{MAX_HISTORY}"));
        assert!(history.get("q0").unwrap().is_none());
        assert!(history.get("q1").unwrap().is_some());
    }

    #[test]
    fn test_remove() {
        let history = history();
        history.record("a", SearchKind::Address).unwrap();
        history.record("b", SearchKind::Address).unwrap();

        assert!(history.remove("a").unwrap());
        assert!(!history.remove("a").unwrap());
        assert_eq!(history.list().unwrap().len(), 1);
    }

    #[test]
    fn test_clear() {
        let history = history();
        history.record("a", SearchKind::Address).unwrap();
        history.clear().unwrap();
        history.clear().unwrap();
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_history_is_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "[{\"broken\"").unwrap();
        let history = HistoryStore::with_clock(store, fixed_clock);

        assert!(history.list().unwrap().is_empty());
        history.record("a", SearchKind::Address).unwrap();
        assert_eq!(history.list().unwrap().len(), 1);
    }

    #[test]
    fn test_record_after_max_timestamp_saturates() {
        let store = MemoryStore::new();
        let stored = format!(
            r#"[{{"query":"old","type":"block","timestamp":{}}}]"#,
            i64::MAX
        );
        store.set(HISTORY_KEY, &stored).unwrap();
        let history = HistoryStore::with_clock(store, fixed_clock);

        let entry = history.record("new", SearchKind::Block).unwrap();

        assert_eq!(entry.timestamp, i64::MAX);
        assert_eq!(history.list().unwrap()[0].query, "new");
    }

    #[test]
    fn test_stored_format() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let history = HistoryStore::with_clock(std::sync::Arc::clone(&store), fixed_clock);
        history.record("123", SearchKind::Block).unwrap();

        assert_eq!(
            store.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"[{"query":"123","type":"block","timestamp":1700000000000}]"#)
        );
    }
}
