//! Search history entry type.

use serde::{Deserialize, Serialize};

use super::search::SearchKind;

/// One remembered query.
///
/// Serialized with the field names `query`, `type` and `timestamp` so the
/// stored array stays readable by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The query exactly as it was searched.
    pub query: String,
    /// Kind the query resolved to.
    #[serde(rename = "type")]
    pub kind: SearchKind,
    /// When the query was last searched, in epoch milliseconds.
    pub timestamp: i64,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(query: impl Into<String>, kind: SearchKind, timestamp: i64) -> Self {
        Self {
            query: query.into(),
            kind,
            timestamp,
        }
    }

    /// Local date/time of the entry, e.g. `Tue, 02 Apr 2024 10:11:12`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        use chrono::TimeZone;

        chrono::Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map_or_else(
                || "Unknown".to_string(),
                |dt| dt.format("%a, %d %b %Y %H:%M:%S").to_string(),
            )
    }
}
