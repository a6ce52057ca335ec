//! In-memory session log.
//!
//! `SessionStore` keeps the ordered message history of one conversation and
//! converts it to and from the portable `SessionSnapshot` export format.

use chrono::Utc;
use neko_types::chat::{Message, SessionSnapshot};
use neko_types::error::SnapshotError;

/// Ordered, append-only (until cleared) message log.
///
/// Timestamps never decrease along the log: a message stamped earlier than
/// the last one is raised to the last timestamp on append.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    messages: Vec<Message>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning the stored copy.
    pub fn append(&mut self, mut message: Message) -> &Message {
        if let Some(last) = self.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }
        self.messages.push(message);
        let idx = self.messages.len() - 1;
        &self.messages[idx]
    }

    /// Drop all messages. Clearing an empty store is a no-op.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Snapshot of the log, stamped now and attributed to `provider_id`.
    pub fn serialize(&self, provider_id: &str) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            exported_at: Utc::now(),
            provider_id: provider_id.to_string(),
        }
    }

    /// Pretty-printed JSON export.
    pub fn to_json(&self, provider_id: &str) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.serialize(provider_id))?)
    }

    /// Replace the log with the messages of `snapshot`.
    ///
    /// Rejects snapshots whose timestamps decrease; the store is left
    /// untouched in that case.
    pub fn load(&mut self, snapshot: SessionSnapshot) -> Result<(), SnapshotError> {
        validate(&snapshot)?;
        self.messages = snapshot.messages;
        Ok(())
    }

    /// Build a store from exported JSON.
    pub fn from_json(json: &str) -> Result<(Self, SessionSnapshot), SnapshotError> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.load(snapshot.clone())?;
        Ok((store, snapshot))
    }
}

/// Check that message timestamps never decrease.
pub fn validate(snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
    for (index, pair) in snapshot.messages.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            return Err(SnapshotError::NonMonotonicTimestamps { index: index + 1 });
        }
    }
    Ok(())
}
