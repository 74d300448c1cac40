use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A past query/response pair in the persisted history.
///
/// Every field is required on deserialization; a stored payload missing any
/// of them is treated as corrupt by the history store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}
