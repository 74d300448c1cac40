use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: String,        // "user" or "assistant"
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// One completed exchange, returned to the frontend after a successful
/// submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
    pub model: Option<String>,
    pub tokens_used: Option<u64>,
}
