use crate::models::ChatMessage;
use chrono::Utc;

/// The in-memory message log for the active session.
///
/// Append-only: messages are never edited or removed, and the log only
/// resets when the app restarts. It is deliberately not persisted.
pub struct Conversation {
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
    seq: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            awaiting_reply: false,
            seq: 0,
        }
    }

    /// Start an exchange with the user's message.
    ///
    /// Returns `None` when the trimmed input is empty or a reply is still
    /// pending; the caller treats that as a no-op. Otherwise the user
    /// message is appended, the in-flight gate is raised, and the message is
    /// returned.
    pub fn begin_exchange(&mut self, text: &str) -> Option<ChatMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.awaiting_reply {
            return None;
        }
        let message = self.push("user", trimmed);
        self.awaiting_reply = true;
        Some(message)
    }

    /// Append the assistant's reply and release the in-flight gate.
    pub fn complete_exchange(&mut self, text: &str) -> ChatMessage {
        self.awaiting_reply = false;
        self.push("assistant", text)
    }

    /// Release the in-flight gate without appending a reply. Called on every
    /// failure path so a failed request never wedges the input.
    pub fn fail_exchange(&mut self) {
        self.awaiting_reply = false;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    fn push(&mut self, role: &str, content: &str) -> ChatMessage {
        let now = Utc::now();
        // Epoch millis alone can collide for messages created back to back;
        // the session counter keeps ids unique and creation-ordered.
        self.seq += 1;
        let message = ChatMessage {
            id: format!("{}-{}", now.timestamp_millis(), self.seq),
            role: role.to_string(),
            content: content.to_string(),
            timestamp: now,
        };
        self.messages.push(message.clone());
        message
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
